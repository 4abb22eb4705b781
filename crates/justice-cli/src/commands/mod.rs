pub(crate) mod media;
pub(crate) mod notify;
pub(crate) mod referral;

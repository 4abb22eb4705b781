pub(crate) mod empty_state;
pub(crate) mod notifications;
pub(crate) mod referral;
pub(crate) mod toast;

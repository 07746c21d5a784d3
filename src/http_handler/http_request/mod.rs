pub(crate) mod authorize_post;
pub(crate) mod metadata_get;
pub(crate) mod request_common;
pub(crate) mod resource;
pub(crate) mod signal_get;
pub(crate) mod signal_set_put;

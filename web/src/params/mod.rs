pub(crate) mod meeting;
pub(crate) mod oauth;

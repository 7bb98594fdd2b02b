pub(crate) mod atlas_session;

pub(crate) mod cue;

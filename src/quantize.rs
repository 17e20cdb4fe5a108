pub(crate) mod dither;
pub(crate) mod palette;

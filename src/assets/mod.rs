pub(crate) mod background;
pub(crate) mod color;
pub(crate) mod fonts;

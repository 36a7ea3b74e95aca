pub(crate) mod descriptors;
pub(crate) mod document;
pub(crate) mod layout;
pub(crate) mod params;
pub(crate) mod style;

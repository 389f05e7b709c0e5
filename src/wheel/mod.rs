pub(crate) mod model;
pub(crate) mod offset;
pub(crate) mod registry;

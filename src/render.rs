pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod logo;
pub(crate) mod plan;
pub(crate) mod shapes;
pub(crate) mod style;

pub mod bag;
pub mod entity;

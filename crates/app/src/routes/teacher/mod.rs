pub mod classes;
pub mod subjects;

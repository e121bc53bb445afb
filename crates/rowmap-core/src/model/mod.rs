pub mod department;

pub use department::{Department, DepartmentId, DepartmentRow, NewDepartment};

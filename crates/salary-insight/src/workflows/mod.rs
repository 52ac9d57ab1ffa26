pub mod income;
pub mod salary;

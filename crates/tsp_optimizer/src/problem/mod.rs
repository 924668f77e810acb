pub mod cycle;
pub mod distance_matrix;
pub mod distance_method;
pub mod point;
pub mod route;
pub mod tsp_problem;

pub mod algorithm;
pub mod brute_force;
pub mod held_karp;
pub mod solution;
pub mod solve_context;
pub mod tsp_solver;

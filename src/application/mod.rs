/// Application layer: use cases orchestrating the domain and infrastructure.
pub mod use_cases;

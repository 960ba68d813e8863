pub mod planet_parameters;

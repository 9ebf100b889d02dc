pub mod type_singleton;

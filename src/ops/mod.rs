pub mod opt;

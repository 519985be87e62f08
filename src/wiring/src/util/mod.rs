pub mod any;

mod wrapper;

pub use wrapper::ClosureProvider;

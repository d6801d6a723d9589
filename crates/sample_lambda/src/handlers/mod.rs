pub mod event;
pub mod lambda;
pub mod response;

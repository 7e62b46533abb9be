//! Adapters implementing the ports against real collaborators.

pub mod live;

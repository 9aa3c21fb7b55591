//! 楽観的ミューテーションの 3 フェーズ（適用・確定・取り消し）

pub mod failure;
pub mod mutation;
pub mod optimistic_collection;
pub mod phases;

pub use failure::MutationFailure;
pub use mutation::{Mutation, MutationKind, OptimisticChange};
pub use optimistic_collection::OptimisticCollection;
pub use phases::{Applied, Reverted};

pub mod group_dto;
pub mod group_handlers;
pub mod group_models;
pub mod group_repository;
pub mod group_sanitizer;
pub mod group_service;
pub mod group_validator;
pub mod group_visibility;

pub use group_models::{GroupDocument, GroupSummary, Item, ItemPriority, Wishlist};
pub use group_repository::GroupRepository;
pub use group_service::GroupService;
pub use group_visibility::Viewer;

//! 画面コンポーネント

pub mod candidate_grid;
pub mod chat;
pub mod footer;
pub mod gmail;
pub mod header;
pub mod landing;
pub mod loading;
pub mod modal;
pub mod project_select;
pub mod project_view;
pub mod projects;
pub mod results;
pub mod upload;

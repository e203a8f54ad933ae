mod view_dto;

pub use view_dto::{NavigateDto, ViewStateDto};

//! Карточка агентства: просмотр долга и редактирование реквизитов
//!
//! - view_model.rs: поля формы и сборка DTO
//! - view.rs: компонент AgencyDetails

mod view;
mod view_model;

pub use view::AgencyDetails;
pub use view_model::AgencyDetailsVm;

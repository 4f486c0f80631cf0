pub mod export_hub;
pub mod login;
pub mod profile;
pub mod register;

pub use export_hub::ExportHubPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;

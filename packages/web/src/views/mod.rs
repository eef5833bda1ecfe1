mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::{AdminDashboard, BuyerDashboard, DeliveryDashboard, SellerDashboard};

mod settings;
pub use settings::Settings;

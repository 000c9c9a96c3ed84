mod credentials;

pub use credentials::CredentialsManager;

//! Account management: profile, password change, deletion

mod service;

#[cfg(test)]
mod tests;

pub use service::AccountService;

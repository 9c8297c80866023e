//! A multi-tenant contacts and skills API.
//!
//! Users register, log in for an access token and a session token, and then
//! manage contacts, skills, and the bindings between them. Every owned record
//! is only visible to the user who created it.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod guard;
pub mod state;
pub mod store;
pub mod token;

pub mod crypto {
    pub mod aes;
    pub mod password;
}

pub mod models {
    pub mod contact;
    pub mod session;
    pub mod skill;
    pub mod user;
}

pub mod repositories {
    pub mod contact;
    pub mod contact_skill;
    pub mod session;
    pub mod skill;
    pub mod user;
}

pub mod services {
    pub mod auth;
}

pub mod handlers {
    pub mod auth;
    pub mod contact_skills;
    pub mod contacts;
    pub mod skills;

    #[cfg(test)]
    mod tests;
}

pub mod middleware_layer {
    pub mod auth;
    pub mod client;
}

pub mod validation;

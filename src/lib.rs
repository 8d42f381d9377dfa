//! # PFM Auth - Authentication core of the personal finance manager
//!
//! This is a facade crate that re-exports all public APIs from the auth components.
//! Use this crate to get access to all authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! pfm_auth = { path = "../pfm_auth" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, typed tokens, etc.
//! - **Ports**: `UserStore`, `RefreshTokenStore`, `PasswordHasher`, `TokenSigner`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RefreshUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `JwtTokenSigner`, `Argon2PasswordHasher`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService` - The main entry point for the auth flows

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use pfm_auth_core::*;
}

// Re-export most commonly used core types at the root level
pub use pfm_auth_core::{
    AccessToken, Email, HashedPassword, Password, PasswordStrengthReport, RefreshToken,
    ResetToken, SignedToken, TokenClaims, TokenKind, TokenPair, User, UserError, UserId,
    evaluate_strength,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use pfm_auth_core::{
        RefreshTokenStore, RefreshTokenStoreError, UserStore, UserStoreError,
    };
}

// Re-export ports at root level
pub use pfm_auth_core::{
    EmailClient, PasswordHashError, PasswordHasher, RefreshTokenStore, RefreshTokenStoreError,
    TokenError, TokenSigner, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use pfm_auth_application::*;
}

// Re-export use cases at root level
pub use pfm_auth_application::{
    AuthSession, ChangePasswordUseCase, ForgotPasswordUseCase, LoginUseCase, LogoutUseCase,
    MessageResponse, ProfileUseCase, RefreshUseCase, RegisterRequest, RegisterUseCase,
    ResetPasswordUseCase, UserProfile,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP error mapping
    pub mod http {
        pub use pfm_auth_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use pfm_auth_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use pfm_auth_adapters::email::*;
    }

    /// Bearer token validation
    pub mod auth {
        pub use pfm_auth_adapters::auth_validation::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use pfm_auth_adapters::hashing::*;
    }

    /// Token signing
    pub mod tokens {
        pub use pfm_auth_adapters::tokens::*;
    }

    /// Configuration
    pub mod config {
        pub use pfm_auth_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use pfm_auth_adapters::{
    Argon2PasswordHasher, AuthApiError, BearerTokenValidator, JwtSignerConfig, JwtTokenSigner,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        HashMapRefreshTokenStore, HashMapUserStore, PostgresRefreshTokenStore, PostgresUserStore,
    },
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use pfm_auth_service::{
    AuthService, PostgresAuthService, build_postgres_auth_service, configure_postgresql,
    init_tracing, spawn_expiry_sweep,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;

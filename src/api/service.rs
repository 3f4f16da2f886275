//! Capabilities shared by services across versions
//!
//! Most services list entities by statement, and many apply bulk actions.
//! Both are exposed under a uniform name as well as the service's own method
//! name, so generic code can page or act without knowing the entity.

use super::error::Result;
use super::operations::{Action, ActionResult};
use super::query::{PageResult, Statement};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[async_trait]
pub trait ByStatement: Send + Sync {
    type Entity: DeserializeOwned + Send;

    async fn get_by_statement(&self, statement: &Statement) -> Result<PageResult<Self::Entity>>;
}

#[async_trait]
pub trait PerformAction: Send + Sync {
    type Action: Action;

    async fn perform_action(&self, action: Self::Action, statement: &Statement) -> Result<ActionResult>;
}

/// Declare a service struct bound to one version and one service name
macro_rules! api_service {
    ($(#[$meta:meta])* $name:ident, $version:expr, $service:literal) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            client: $crate::api::client::SoapClient,
        }

        impl $crate::api::registry::ApiService for $name {
            const VERSION: &'static str = $version;
            const NAME: &'static str = $service;

            fn bind(client: $crate::api::client::SoapClient) -> Self {
                Self { client }
            }
        }

        impl $name {
            pub fn client(&self) -> &$crate::api::client::SoapClient {
                &self.client
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("endpoint", &self.client.endpoint())
                    .finish()
            }
        }
    };
}

/// `get*ByStatement` as an inherent method plus `ByStatement`
macro_rules! by_statement {
    ($service:ty, $fn_name:ident, $method:literal, $parameter:literal, $entity:ty) => {
        impl $service {
            pub async fn $fn_name(
                &self,
                statement: &$crate::api::query::Statement,
            ) -> $crate::api::error::Result<$crate::api::query::PageResult<$entity>> {
                self.client.get_page($method, $parameter, statement).await
            }
        }

        #[::async_trait::async_trait]
        impl $crate::api::service::ByStatement for $service {
            type Entity = $entity;

            async fn get_by_statement(
                &self,
                statement: &$crate::api::query::Statement,
            ) -> $crate::api::error::Result<$crate::api::query::PageResult<$entity>> {
                self.$fn_name(statement).await
            }
        }
    };
}

/// `perform*Action` as an inherent method plus `PerformAction`
macro_rules! perform_action {
    ($service:ty, $fn_name:ident, $method:literal, $action:ty) => {
        impl $service {
            pub async fn $fn_name(
                &self,
                action: $action,
                statement: &$crate::api::query::Statement,
            ) -> $crate::api::error::Result<$crate::api::operations::ActionResult> {
                self.client.perform($method, action, statement).await
            }
        }

        #[::async_trait::async_trait]
        impl $crate::api::service::PerformAction for $service {
            type Action = $action;

            async fn perform_action(
                &self,
                action: $action,
                statement: &$crate::api::query::Statement,
            ) -> $crate::api::error::Result<$crate::api::operations::ActionResult> {
                self.$fn_name(action, statement).await
            }
        }
    };
}

/// Declare a closed action enum for one entity family
macro_rules! actions {
    ($(#[$meta:meta])* $name:ident, $parameter:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::api::operations::Action for $name {
            const PARAMETER: &'static str = $parameter;

            fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }
    };
}

pub(crate) use {actions, api_service, by_statement, perform_action};

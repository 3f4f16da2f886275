use crate::api::client::NoArgs;
use crate::api::error::Result;
use crate::api::service::{actions, api_service, by_statement, perform_action};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i64>,
    pub role_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_email_notification_allowed: Option<bool>,
    pub external_id: Option<String>,
    pub is_service_account: Option<bool>,
    pub orders_ui_local_time_zone_id: Option<String>,
}

actions!(
    UserAction,
    "userAction" {
        Activate => "ActivateUsers",
        Deactivate => "DeactivateUsers",
    }
);

api_service!(
    /// Users and their roles
    UserService,
    super::VERSION,
    "UserService"
);

by_statement!(UserService, get_users_by_statement, "getUsersByStatement", "filterStatement", User);
perform_action!(UserService, perform_user_action, "performUserAction", UserAction);

impl UserService {
    /// The user the access token belongs to
    pub async fn get_current_user(&self) -> Result<User> {
        self.client
            .call_rval(&NoArgs {
                method: "getCurrentUser",
            })
            .await
    }
}

use diesel::prelude::*;

use crate::infrastructure::driven::persistence::schema::permissions;

#[derive(QueryableByName)]
#[diesel(table_name = permissions)]
pub struct DbPermission {
    pub id: String,
    pub snippet_id: String,
    pub user_id: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}

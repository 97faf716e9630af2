diesel::table! {
    permissions (id) {
        id -> Text,
        snippet_id -> Text,
        user_id -> Text,
        role -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

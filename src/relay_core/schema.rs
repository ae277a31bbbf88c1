diesel::table! {
    messages (id) {
        id -> Integer,
        role -> Text,
        content -> Text,
        timestamp -> Timestamp,
    }
}

//! Diesel table definitions matching `backend/migrations`.

diesel::table! {
    /// Registered community members.
    users (id) {
        id -> Uuid,
        /// Unique case-insensitively.
        email -> Varchar,
        username -> Varchar,
        /// `member` or `admin`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only cookie consent log.
    cookie_consents (id) {
        id -> Uuid,
        ip_address -> Text,
        user_agent -> Text,
        accepted -> Bool,
        /// Client-reported decision time.
        consented_at -> Timestamptz,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    battles (id) {
        id -> Uuid,
        title -> Varchar,
        starts_at -> Timestamptz,
    }
}

diesel::table! {
    battle_signups (id) {
        id -> Uuid,
        battle_id -> Uuid,
        user_id -> Uuid,
        /// `pending`, `confirmed` or `withdrawn`.
        status -> Varchar,
    }
}

diesel::table! {
    application_cooldowns (user_id) {
        user_id -> Uuid,
        reason -> Text,
        expires_at -> Timestamptz,
    }
}

diesel::joinable!(battle_signups -> battles (battle_id));
diesel::joinable!(battle_signups -> users (user_id));
diesel::joinable!(application_cooldowns -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    cookie_consents,
    battles,
    battle_signups,
    application_cooldowns,
);

diesel::table! {
    bookings (id) {
        id -> Uuid,
        client_email -> Text,
        requested_at -> Timestamptz,
        responded_at -> Nullable<Timestamptz>,
        response -> Nullable<Text>,
        appointment_time -> Nullable<Timestamptz>,
    }
}

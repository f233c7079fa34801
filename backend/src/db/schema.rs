diesel::table! {
    czesci (id) {
        id -> Integer,
        nazwa -> Text,
        kategoria -> Text,
        ilosc -> Integer,
        zarezerwowane -> Integer,
        min_stan -> Integer,
        status -> Text,
    }
}

diesel::table! {
    dostawy (id) {
        id -> Integer,
        dostawca -> Text,
        czesc_id -> Integer,
        ilosc -> Integer,
        termin -> Date,
        status -> Text,
    }
}

diesel::table! {
    harmonogram (id) {
        id -> Integer,
        zadanie -> Text,
        lokalizacja -> Text,
        zasob_id -> Text,
        priorytet -> Text,
        godzina -> Text,
        czas_trwania -> Text,
    }
}

diesel::joinable!(dostawy -> czesci (czesc_id));

diesel::allow_tables_to_appear_in_same_query!(czesci, dostawy, harmonogram);

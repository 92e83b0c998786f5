/// A published listing with its live counters.
pub struct Listing {
    pub approved: bool,
    pub views: u64,
    pub clicks: u64,
}

const fn listing(approved: bool, views: u64, clicks: u64) -> Listing {
    Listing {
        approved,
        views,
        clicks,
    }
}

/// Live listing records. Unapproved listings do not count toward totals.
pub fn by_owner(owner: &str) -> Option<Vec<Listing>> {
    match owner {
        "acme" => Some(vec![
            listing(true, 400, 22),
            listing(true, 250, 18),
            listing(false, 900, 70),
            listing(true, 10, 0),
        ]),
        "newco" => Some(vec![listing(true, 50, 5), listing(false, 5, 5)]),
        _ => None,
    }
}

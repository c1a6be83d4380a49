use shared::domain::{City, Offer, OfferId};

/// Plain description of a state change. Dispatching one through the store is
/// the only way state moves.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetOffers(Vec<Offer>),
    SetError(Option<String>),
    SetCity(City),
    SetFavorite {
        offer_id: OfferId,
        is_favorite: bool,
    },
    SetAuthorizationStatus(bool),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetLoading(_) => "offers/setLoading",
            Self::SetOffers(_) => "offers/setOffers",
            Self::SetError(_) => "offers/setError",
            Self::SetCity(_) => "offers/setCity",
            Self::SetFavorite { .. } => "offers/setFavorite",
            Self::SetAuthorizationStatus(_) => "auth/setAuthorizationStatus",
        }
    }
}

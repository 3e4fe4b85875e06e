use crate::models::*;
use crate::store::ClientStore;

/// Create a ClientRecord with the given identity and balance, other fields derived from the name.
pub(crate) fn client(id: &str, name: &str, nationality: &str, account_balance: f64) -> ClientRecord {
    let handle = name.to_lowercase().replace(' ', ".");
    ClientRecord {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", handle),
        mobile_phone: "+00 0000 0000".to_string(),
        nationality: nationality.to_string(),
        race: "Unspecified".to_string(),
        address: "1 Example Road".to_string(),
        account_balance,
    }
}

/// Alice: Singaporean with a balance of 1500.
pub(crate) fn alice() -> ClientRecord {
    ClientRecord {
        id: "C1".to_string(),
        name: "Alice Tan".to_string(),
        email: "alice.tan@example.com".to_string(),
        mobile_phone: "+65 9123 4567".to_string(),
        nationality: "Singaporean".to_string(),
        race: "Chinese".to_string(),
        address: "12 Orchard Road, Singapore".to_string(),
        account_balance: 1500.0,
    }
}

/// Bob: Malaysian with a balance of 500.
pub(crate) fn bob() -> ClientRecord {
    ClientRecord {
        id: "C2".to_string(),
        name: "Bob Lee".to_string(),
        email: "bob.lee@example.com".to_string(),
        mobile_phone: "+60 12 345 6789".to_string(),
        nationality: "Malaysian".to_string(),
        race: "Malay".to_string(),
        address: "8 Jalan Ampang, Kuala Lumpur".to_string(),
        account_balance: 500.0,
    }
}

/// Create a store holding Alice and Bob.
pub(crate) fn get_test_store() -> ClientStore {
    ClientStore::new(vec![alice(), bob()]).unwrap()
}

/// Create a store with a wider spread of nationalities and balances.
pub(crate) fn get_test_store_large() -> ClientStore {
    ClientStore::new(vec![
        alice(),
        bob(),
        client("C3", "Chandra Kumar", "Indian", 2500.75),
        client("C4", "Dewi Lestari", "Indonesian", 0.0),
        client("C5", "Erin Goh", "Singaporean", 1000.0),
        client("C6", "Farid Aziz", "Malaysian", 1000.0),
        client("C7", "Grace Lim", "singaporean", 99999.99),
    ])
    .unwrap()
}

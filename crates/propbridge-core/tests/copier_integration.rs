//! End-to-end copies between records and hand-written beans


use pretty_assertions::assert_eq;
use propbridge_core::bean::{Bean, Record, Value};
use propbridge_core::{copy, Copier, Error};
use test_support::{member, Address, Customer};

#[test]
fn test_domain_to_dto() {
    let domain = test_support::domain()
        .with("extraProp", "x")
        .with("enumProp", member("SECOND"));

    let dto = Copier::new(test_support::dto())
        .source(&domain)
        .execute()
        .unwrap()
        .unwrap();

    assert_eq!(dto.value("extraProp"), &Value::from("x"));
    assert_eq!(dto.value("enumProp"), &Value::from("SECOND"));
}

#[test]
fn test_record_into_struct() {
    let profile = Record::new(test_support::profile_type())
        .with("name", "Ada")
        .with("tier", member("FIRST"))
        .with("city", "London")
        .with("visits", 12i64);
    let target = Customer {
        address: Some(Address::default()),
        ..Customer::default()
    };

    let customer = Copier::new(target)
        .source(&profile)
        .map("city", "address.city")
        .execute()
        .unwrap()
        .unwrap();

    assert_eq!(
        customer,
        Customer {
            name: Some("Ada".into()),
            tier: Some("FIRST".into()),
            visits: 12,
            address: Some(Address {
                city: Some("London".into())
            }),
        }
    );
}

#[test]
fn test_struct_into_record() {
    let customer = Customer {
        name: Some("Grace".into()),
        tier: Some("SECOND".into()),
        visits: 3,
        address: Some(Address {
            city: Some("Arlington".into()),
        }),
    };

    let profile = Copier::new(Record::new(test_support::profile_type()))
        .source(&customer)
        .map("address.city", "city")
        .execute()
        .unwrap()
        .unwrap();

    assert_eq!(profile.value("name"), &Value::from("Grace"));
    assert_eq!(profile.value("tier"), &member("SECOND"));
    assert_eq!(profile.value("city"), &Value::from("Arlington"));
    assert_eq!(profile.value("visits"), &Value::Int(3));
}

#[test]
fn test_missing_nested_source_keeps_target_value() {
    let customer = Customer {
        name: Some("Grace".into()),
        ..Customer::default()
    };
    let target = Record::new(test_support::profile_type()).with("city", "Paris");

    let profile = Copier::new(target)
        .source(&customer)
        .map("address.city", "city")
        .execute()
        .unwrap()
        .unwrap();

    assert_eq!(profile.value("city"), &Value::from("Paris"));
    assert_eq!(profile.value("name"), &Value::from("Grace"));
}

#[test]
fn test_missing_nested_target_is_left_missing() {
    let profile = Record::new(test_support::profile_type()).with("city", "Paris");

    let customer = Copier::new(Customer::default())
        .source(&profile)
        .map("city", "address.city")
        .execute()
        .unwrap()
        .unwrap();

    assert_eq!(customer.address, None);
}

#[test]
fn test_refused_write_keeps_value() {
    // Customer.visits is not nullable, so the null from the profile is refused
    let profile = Record::new(test_support::profile_type()).with("name", "Ada");
    let target = Customer {
        visits: 7,
        ..Customer::default()
    };

    let customer = Copier::new(target).source(&profile).execute().unwrap().unwrap();
    assert_eq!(customer.visits, 7);
    assert_eq!(customer.name.as_deref(), Some("Ada"));
}

#[test]
fn test_invalid_tier_is_an_error() {
    let customer = Customer {
        tier: Some("GOLD".into()),
        ..Customer::default()
    };

    let err = Copier::new(Record::new(test_support::profile_type()))
        .source(&customer)
        .execute()
        .unwrap_err();
    match err {
        Error::InvalidEnumLiteral { literal, path, .. } => {
            assert_eq!(literal, "GOLD");
            assert_eq!(path, "tier");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_merge_two_sources() {
    let domain = test_support::domain()
        .with("extraProp", "from-domain")
        .with("nestedProp", test_support::nested_prop("deep"))
        .with("count", 2i64);
    let customer = Customer {
        name: Some("Ada".into()),
        ..Customer::default()
    };

    let dto = Copier::new(test_support::dto())
        .source(&domain)
        .map("nestedProp.prop1", "prop1")
        .source(&customer)
        .map("name", "extraProp")
        .skip_nulls(true)
        .execute()
        .unwrap()
        .unwrap();

    assert_eq!(dto.value("extraProp"), &Value::from("Ada"));
    assert_eq!(dto.value("prop1"), &Value::from("deep"));
    assert_eq!(dto.value("count"), &Value::Int(2));
}

#[test]
fn test_converter_borrows_local_state() {
    let prefix = String::from("id-");
    let domain = test_support::domain().with("extraProp", "42");

    let dto = Copier::new(test_support::dto())
        .source(&domain)
        .converter(|value| match value {
            Value::Str(s) => Value::Str(format!("{}{}", prefix, s)),
            other => other,
        })
        .execute()
        .unwrap()
        .unwrap();

    assert_eq!(dto.value("extraProp"), &Value::from("id-42"));
}

#[test]
fn test_copy_convenience() {
    let customer = Customer {
        name: Some("Ada".into()),
        tier: Some("FIRST".into()),
        ..Customer::default()
    };

    let copied = copy(&customer, Customer::default(), &["tier"]).unwrap().unwrap();
    assert_eq!(copied.name.as_deref(), Some("Ada"));
    assert_eq!(copied.tier, None);
    assert_eq!(copied.get("class").ok(), Some(Value::from("Customer")));
}

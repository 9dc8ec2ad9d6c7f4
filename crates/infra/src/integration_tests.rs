//! Integration tests for both components over the in-memory stores.
//!
//! Verifies:
//! - Booking rules hold end to end, including under concurrent callers
//! - Stock movements keep quantities and derived alerts consistent
//! - Admin-only operations reject other principals without mutating

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use chrono::{NaiveDate, TimeZone, Utc};

    use salonbook_auth::{AuthzError, Principal, Role};
    use salonbook_core::{FixedClock, UuidV7Generator};
    use salonbook_inventory::{LedgerConfig, LedgerError, Movement, NewStockItem, StockItemPatch};
    use salonbook_scheduling::{
        AppointmentPatch, AppointmentStatus, BookingRequest, CustomerKind, SchedulingConfig, SchedulingError, Slot,
    };

    use crate::seed::SeedError;
    use crate::services::Services;

    fn thursday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 25).unwrap()
    }

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 26).unwrap()
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 28).unwrap()
    }

    fn slot(raw: &str) -> Slot {
        raw.parse().unwrap()
    }

    fn three_slot_config() -> SchedulingConfig {
        SchedulingConfig {
            available_slots: vec![slot("09:00"), slot("10:00"), slot("11:00")],
            ..SchedulingConfig::default()
        }
    }

    fn setup_with(config: SchedulingConfig) -> (Services, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap()));
        let services = Services::in_memory(
            config,
            LedgerConfig::default(),
            clock.clone(),
            Arc::new(UuidV7Generator),
        )
        .unwrap();
        (services, clock)
    }

    fn setup() -> Services {
        setup_with(three_slot_config()).0
    }

    fn booking(name: &str, date: NaiveDate, at: &str) -> BookingRequest {
        BookingRequest {
            customer_name: Some(name.to_string()),
            email: Some(format!("{}@email.com", name.to_lowercase())),
            date: Some(date),
            slot: Some(at.to_string()),
            service: Some("Corte y Peinado".to_string()),
            customer_kind: Some(CustomerKind::New),
            ..BookingRequest::default()
        }
    }

    fn stock_request(on_hand: u32, threshold: u32) -> NewStockItem {
        NewStockItem {
            product_ref: Some("1".to_string()),
            name: Some("Champú Reparador".to_string()),
            category: Some("Cuidado Capilar".to_string()),
            quantity_on_hand: Some(on_hand),
            reorder_threshold: Some(threshold),
            purchase_price: Some(80_000),
            sale_price: Some(120_000),
            ..NewStockItem::default()
        }
    }

    #[test]
    fn availability_after_two_bookings() {
        let services = setup();
        let customer = Principal::customer();

        services.scheduler.create_appointment(&customer, booking("Ana", thursday(), "09:00")).unwrap();
        services.scheduler.create_appointment(&customer, booking("Eva", thursday(), "10:00")).unwrap();

        let availability = services.scheduler.list_available_slots(thursday()).unwrap();
        assert_eq!(availability.available_slots, vec![slot("11:00")]);
        assert_eq!(availability.booked_count, 2);
        assert_eq!(availability.daily_capacity, 3);

        let again = services.scheduler.list_available_slots(thursday()).unwrap();
        assert_eq!(availability, again);

        let json = serde_json::to_value(&availability).unwrap();
        assert_eq!(json["available_slots"], serde_json::json!(["11:00"]));
    }

    #[test]
    fn full_day_rejects_any_slot() {
        let config = SchedulingConfig {
            daily_capacity: 2,
            ..three_slot_config()
        };
        let (services, _) = setup_with(config);
        let customer = Principal::customer();

        services.scheduler.create_appointment(&customer, booking("Ana", thursday(), "09:00")).unwrap();
        services.scheduler.create_appointment(&customer, booking("Eva", thursday(), "10:00")).unwrap();

        let err = services
            .scheduler
            .create_appointment(&customer, booking("Luz", thursday(), "11:00"))
            .unwrap_err();
        assert_eq!(err, SchedulingError::DayFull { date: thursday(), capacity: 2 });
        assert_eq!(services.scheduler.list_appointments().unwrap().len(), 2);
    }

    #[test]
    fn taken_slot_is_rejected_below_capacity() {
        let services = setup();
        let customer = Principal::customer();

        services.scheduler.create_appointment(&customer, booking("Ana", thursday(), "10:00")).unwrap();
        let err = services
            .scheduler
            .create_appointment(&customer, booking("Eva", thursday(), "10:00"))
            .unwrap_err();
        assert_eq!(err, SchedulingError::SlotTaken { date: thursday(), slot: slot("10:00") });
    }

    #[test]
    fn excluded_weekday_wins_over_other_problems() {
        let services = setup();
        let mut request = booking("Ana", sunday(), "23:00");
        request.service = Some("Masaje".to_string());

        let err = services.scheduler.create_appointment(&Principal::customer(), request).unwrap_err();
        assert_eq!(err, SchedulingError::ExcludedDay(sunday()));
    }

    #[test]
    fn concurrent_bookings_never_exceed_capacity() {
        let config = SchedulingConfig {
            daily_capacity: 3,
            available_slots: ["09:00", "10:00", "11:00", "12:00", "14:00", "15:00"]
                .into_iter()
                .map(slot)
                .collect(),
            ..SchedulingConfig::default()
        };
        let (services, _) = setup_with(config);
        let services = Arc::new(services);

        let handles: Vec<_> = (0..12)
            .map(|i| {
                let services = services.clone();
                thread::spawn(move || {
                    let at = ["09:00", "10:00", "11:00", "12:00", "14:00", "15:00"][i % 6];
                    services
                        .scheduler
                        .create_appointment(&Principal::customer(), booking(&format!("C{i}"), thursday(), at))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let accepted = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(accepted, 3);
        assert!(results.iter().all(|r| match r {
            Ok(_) => true,
            Err(e) => matches!(e, SchedulingError::DayFull { .. } | SchedulingError::SlotTaken { .. }),
        }));

        let booked = services.scheduler.list_appointments().unwrap();
        assert_eq!(booked.len(), 3);
        let mut slots: Vec<_> = booked.iter().map(|a| a.slot).collect();
        slots.dedup();
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn rescheduling_onto_a_taken_slot_is_rejected() {
        let services = setup();
        let customer = Principal::customer();
        let admin = Principal::admin();

        services.scheduler.create_appointment(&customer, booking("Ana", thursday(), "09:00")).unwrap();
        let eva = services.scheduler.create_appointment(&customer, booking("Eva", friday(), "09:00")).unwrap();

        let patch = AppointmentPatch {
            date: Some(thursday()),
            ..AppointmentPatch::default()
        };
        let err = services.scheduler.update_appointment(&admin, eva.id, patch).unwrap_err();
        assert_eq!(err, SchedulingError::SlotTaken { date: thursday(), slot: slot("09:00") });
        assert_eq!(services.scheduler.get_appointment(eva.id).unwrap().date, friday());

        let patch = AppointmentPatch {
            date: Some(thursday()),
            slot: Some("11:00".to_string()),
            ..AppointmentPatch::default()
        };
        let moved = services.scheduler.update_appointment(&admin, eva.id, patch).unwrap();
        assert_eq!((moved.date, moved.slot), (thursday(), slot("11:00")));
    }

    #[test]
    fn status_update_keeps_the_appointment_in_place() {
        let (services, clock) = setup_with(three_slot_config());
        let booked = services
            .scheduler
            .create_appointment(&Principal::customer(), booking("Ana", thursday(), "09:00"))
            .unwrap();
        assert_eq!(booked.status, AppointmentStatus::Pending);

        clock.advance(chrono::Duration::hours(1));
        let patch: AppointmentPatch = serde_json::from_str(r#"{"status":"confirmada"}"#).unwrap();
        let updated = services.scheduler.update_appointment(&Principal::admin(), booked.id, patch).unwrap();

        assert_eq!(updated.status, AppointmentStatus::Confirmed);
        assert_eq!(updated.created_at, booked.created_at);
        assert!(updated.updated_at > booked.updated_at);
    }

    #[test]
    fn customers_cannot_use_admin_operations() {
        let services = setup();
        let customer = Principal::customer();
        let booked = services
            .scheduler
            .create_appointment(&customer, booking("Ana", thursday(), "09:00"))
            .unwrap();

        let err = services.scheduler.delete_appointment(&customer, booked.id).unwrap_err();
        assert_eq!(
            err,
            SchedulingError::Forbidden(AuthzError::Forbidden {
                operation: "appointments.delete",
                required: Role::Admin,
            })
        );
        assert!(services.scheduler.get_appointment(booked.id).is_ok());

        let err = services.ledger.create_item(&customer, stock_request(5, 10)).unwrap_err();
        assert_eq!(err.code(), "forbidden");
        assert!(services.ledger.list_items().unwrap().is_empty());
    }

    #[test]
    fn customers_cannot_change_appointments_or_stock() {
        let services = setup();
        let customer = Principal::customer();
        let admin = Principal::admin();

        let booked = services
            .scheduler
            .create_appointment(&customer, booking("Ana", thursday(), "09:00"))
            .unwrap();
        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Completed),
            slot: Some("11:00".to_string()),
            ..AppointmentPatch::default()
        };
        let err = services.scheduler.update_appointment(&customer, booked.id, patch).unwrap_err();
        assert_eq!(
            err,
            SchedulingError::Forbidden(AuthzError::Forbidden {
                operation: "appointments.update",
                required: Role::Admin,
            })
        );
        assert_eq!(services.scheduler.get_appointment(booked.id).unwrap(), booked);

        let item = services.ledger.create_item(&admin, stock_request(5, 10)).unwrap();
        let forbidden = |operation: &'static str| {
            LedgerError::Forbidden(AuthzError::Forbidden {
                operation,
                required: Role::Admin,
            })
        };

        let patch = StockItemPatch {
            quantity_on_hand: Some(50),
            ..StockItemPatch::default()
        };
        assert_eq!(
            services.ledger.update_item(&customer, item.item.id, patch),
            Err(forbidden("stock.update"))
        );
        assert_eq!(services.ledger.get_item(item.item.id).unwrap(), item);

        assert_eq!(
            services.ledger.apply_movement(&customer, item.item.id, Movement::exit(2)),
            Err(forbidden("stock.movement"))
        );
        assert_eq!(services.ledger.get_item(item.item.id).unwrap(), item);

        assert_eq!(
            services.ledger.delete_item(&customer, item.item.id),
            Err(forbidden("stock.delete"))
        );
        assert_eq!(services.ledger.get_item(item.item.id).unwrap(), item);
    }

    #[test]
    fn customers_may_attach_photos() {
        let services = setup();
        let customer = Principal::customer();
        let booked = services
            .scheduler
            .create_appointment(&customer, booking("Ana", thursday(), "09:00"))
            .unwrap();

        let updated = services
            .scheduler
            .attach_photo(&customer, booked.id, Some("aGVsbG8=".to_string()))
            .unwrap();
        assert_eq!(updated.photo.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn deleted_appointment_frees_its_slot() {
        let services = setup();
        let booked = services
            .scheduler
            .create_appointment(&Principal::customer(), booking("Ana", thursday(), "09:00"))
            .unwrap();

        services.scheduler.delete_appointment(&Principal::admin(), booked.id).unwrap();
        assert_eq!(
            services.scheduler.delete_appointment(&Principal::admin(), booked.id),
            Err(SchedulingError::NotFound)
        );

        let availability = services.scheduler.list_available_slots(thursday()).unwrap();
        assert_eq!(availability.booked_count, 0);
        assert_eq!(availability.available_slots.len(), 3);
    }

    #[test]
    fn exit_movement_updates_quantity_and_alerts() {
        let services = setup();
        let admin = Principal::admin();
        let created = services.ledger.create_item(&admin, stock_request(6, 10)).unwrap();
        assert!(created.alerts.low_stock);
        assert!(!created.alerts.critical_stock);

        let moved = services
            .ledger
            .apply_movement(&admin, created.item.id, Movement::exit(3).with_reason("servicio"))
            .unwrap();
        assert_eq!(moved.item.quantity_on_hand, 3);
        assert!(moved.alerts.low_stock);
        assert!(moved.alerts.critical_stock);

        let stored = services.ledger.get_item(created.item.id).unwrap();
        assert_eq!(stored, moved);
    }

    #[test]
    fn oversized_exit_leaves_item_unchanged() {
        let services = setup();
        let admin = Principal::admin();
        let created = services.ledger.create_item(&admin, stock_request(3, 10)).unwrap();

        let err = services
            .ledger
            .apply_movement(&admin, created.item.id, Movement::exit(999))
            .unwrap_err();
        assert_eq!(err, LedgerError::InsufficientStock { requested: 999, on_hand: 3 });
        assert_eq!(services.ledger.get_item(created.item.id).unwrap(), created);
    }

    #[test]
    fn entry_clears_low_stock_alerts() {
        let (services, clock) = setup_with(three_slot_config());
        let admin = Principal::admin();
        let created = services.ledger.create_item(&admin, stock_request(2, 5)).unwrap();
        assert!(created.alerts.critical_stock);

        clock.advance(chrono::Duration::days(1));
        let moved = services
            .ledger
            .apply_movement(&admin, created.item.id, Movement::entry(10).with_supplier("Wella"))
            .unwrap();
        assert_eq!(moved.item.quantity_on_hand, 12);
        assert!(!moved.alerts.any());
        assert_eq!(moved.item.last_restocked_at, Some(Utc.with_ymd_and_hms(2024, 1, 21, 12, 0, 0).unwrap()));
        assert_eq!(moved.item.supplier.as_deref(), Some("Wella"));
    }

    #[test]
    fn threshold_update_recomputes_alerts() {
        let services = setup();
        let admin = Principal::admin();
        let created = services.ledger.create_item(&admin, stock_request(15, 8)).unwrap();
        assert!(!created.alerts.low_stock);

        let patch = StockItemPatch {
            reorder_threshold: Some(20),
            ..StockItemPatch::default()
        };
        let updated = services.ledger.update_item(&admin, created.item.id, patch).unwrap();
        assert!(updated.alerts.low_stock);
        assert!(!updated.alerts.critical_stock);

        let summary = services.ledger.list_alerts().unwrap();
        assert_eq!(summary.low_stock.len(), 1);
        assert_eq!(summary.total_flagged, 1);
    }

    #[test]
    fn demo_data_feeds_both_dashboards() {
        let services = setup();
        let report = services.seed_demo_data().unwrap();
        assert_eq!((report.appointments, report.stock_items), (3, 3));

        let stats = services.scheduler.compute_statistics().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!((stats.pending, stats.confirmed, stats.completed), (1, 1, 1));
        assert_eq!((stats.new_customers, stats.returning_customers), (1, 2));

        let stock = services.ledger.compute_statistics().unwrap();
        assert_eq!(stock.total_items, 3);
        assert_eq!(stock.critical_stock_count, 2);
        assert_eq!(stock.normal_count, 1);

        let alerts = services.ledger.list_alerts().unwrap();
        assert!(alerts.low_stock.is_empty());
        assert_eq!(alerts.critical_stock.len(), 2);

        // 2024-01-25 already holds two seeded bookings (10:00, 14:00).
        let availability = services.scheduler.list_available_slots(thursday()).unwrap();
        assert_eq!(availability.booked_count, 2);
        assert_eq!(availability.available_slots, vec![slot("09:00"), slot("11:00")]);
    }

    #[test]
    fn ledger_delete_removes_the_item() {
        let services = setup();
        let admin = Principal::admin();
        let created = services.ledger.create_item(&admin, stock_request(5, 1)).unwrap();

        services.ledger.delete_item(&admin, created.item.id).unwrap();
        assert_eq!(services.ledger.get_item(created.item.id), Err(LedgerError::NotFound));
        assert_eq!(
            services.ledger.apply_movement(&admin, created.item.id, Movement::entry(1)),
            Err(LedgerError::NotFound)
        );
    }

    #[test]
    fn seeding_twice_adds_no_duplicates() {
        let services = setup();
        services.seed_demo_data().unwrap();

        let err = services.seed_demo_data().unwrap_err();
        assert!(matches!(err, SeedError::AlreadySeeded { appointments: 3, stock_items: 3 }));
        assert_eq!(services.scheduler.list_appointments().unwrap().len(), 3);
        assert_eq!(services.ledger.list_items().unwrap().len(), 3);

        let availability = services.scheduler.list_available_slots(thursday()).unwrap();
        assert_eq!(availability.booked_count, 2);
        assert!(availability.booked_count <= availability.daily_capacity);
    }

    #[test]
    fn seeding_after_live_bookings_is_refused() {
        let services = setup();
        services
            .scheduler
            .create_appointment(&Principal::customer(), booking("Ana", thursday(), "10:00"))
            .unwrap();

        assert!(matches!(
            services.seed_demo_data(),
            Err(SeedError::AlreadySeeded { appointments: 1, stock_items: 0 })
        ));
        assert_eq!(services.scheduler.list_appointments().unwrap().len(), 1);
        assert!(services.ledger.list_items().unwrap().is_empty());
    }

    #[test]
    fn historical_off_catalog_slot_must_be_replaced_when_moving() {
        let services = setup();
        services.seed_demo_data().unwrap();
        let admin = Principal::admin();
        let monday = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();

        let carmen = services
            .scheduler
            .list_appointments()
            .unwrap()
            .into_iter()
            .find(|a| a.slot == slot("11:30"))
            .unwrap();

        let date_only = AppointmentPatch {
            date: Some(monday),
            ..AppointmentPatch::default()
        };
        let err = services.scheduler.update_appointment(&admin, carmen.id, date_only).unwrap_err();
        assert_eq!(err, SchedulingError::InvalidSlot("11:30".to_string()));
        assert_eq!(services.scheduler.get_appointment(carmen.id).unwrap(), carmen);

        let with_slot = AppointmentPatch {
            date: Some(monday),
            slot: Some("09:00".to_string()),
            ..AppointmentPatch::default()
        };
        let moved = services.scheduler.update_appointment(&admin, carmen.id, with_slot).unwrap();
        assert_eq!((moved.date, moved.slot), (monday, slot("09:00")));

        // Edits that leave date and slot alone keep the historical slot.
        let notes_only: AppointmentPatch = serde_json::from_str(r#"{"notes":"revisado"}"#).unwrap();
        let other = services
            .scheduler
            .list_appointments()
            .unwrap()
            .into_iter()
            .find(|a| a.id != carmen.id)
            .unwrap();
        let updated = services.scheduler.update_appointment(&admin, other.id, notes_only).unwrap();
        assert_eq!(updated.slot, other.slot);
    }
}

#[cfg(test)]
mod tests {
    use crate::booking::{BookingRequest, BookingSubmissionHandler};
    use crate::error::SchedulingError;
    use crate::links::LinkResolver;
    use crate::policy::{BusinessRules, PastSlotPolicy};
    use crate::store::InMemoryLinkStore;
    use crate::test_support::{busy, link, utc, StubCalendar};
    use meetme_common::DynCalendarService;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn now() -> chrono::DateTime<chrono::Utc> {
        utc(2029, 12, 31, 8, 0)
    }

    fn handler_with(calendar: Arc<StubCalendar>, rules: BusinessRules) -> BookingSubmissionHandler {
        let store = Arc::new(InMemoryLinkStore::with_links(vec![
            link("intro-call", 45),
            link("deep-dive", 90),
        ]));
        let calendar: DynCalendarService = calendar;
        BookingSubmissionHandler::new(Some(calendar), LinkResolver::new(store), rules, 30)
    }

    fn request(start: &str) -> BookingRequest {
        BookingRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            start: start.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_fields_fail_before_any_calendar_call() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        for req in [
            BookingRequest {
                name: "  ".to_string(),
                ..request("2030-01-01T10:00:00Z")
            },
            BookingRequest {
                email: String::new(),
                ..request("2030-01-01T10:00:00Z")
            },
            request(""),
        ] {
            let err = handler.submit(req, now()).await.unwrap_err();
            assert!(matches!(err, SchedulingError::ValidationError(_)));
        }

        let err = handler
            .submit(request("tomorrow at ten"), now())
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::ValidationError(ref m) if m.contains("start")));

        assert_eq!(calendar.list_calls(), 0);
        assert_eq!(calendar.create_calls(), 0);
    }

    #[tokio::test]
    async fn email_without_at_sign_is_rejected() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let req = BookingRequest {
            email: "ada.example.com".to_string(),
            ..request("2030-01-01T10:00:00Z")
        };
        assert!(matches!(
            handler.submit(req, now()).await,
            Err(SchedulingError::ValidationError(_))
        ));
        assert_eq!(calendar.list_calls(), 0);
    }

    #[tokio::test]
    async fn free_slot_is_booked_with_default_duration() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let confirmation = handler
            .submit(request("2030-01-01T10:00:00Z"), now())
            .await
            .unwrap();

        assert_eq!(confirmation.message, "Meeting booked successfully");
        assert_eq!(confirmation.event_id, "evt-1");
        assert_eq!(confirmation.start, utc(2030, 1, 1, 10, 0));
        assert_eq!(confirmation.end, utc(2030, 1, 1, 10, 30));
        assert_eq!(calendar.list_calls(), 1);

        let created = calendar.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].summary.as_deref(), Some("Meeting with Ada Lovelace"));
        assert_eq!(created[0].description, None);
        assert_eq!(
            created[0].attendees[0].email.as_deref(),
            Some("ada@example.com")
        );
    }

    #[tokio::test]
    async fn offset_timestamps_are_normalized_to_utc() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let confirmation = handler
            .submit(request("2030-01-01T11:00:00+01:00"), now())
            .await
            .unwrap();
        assert_eq!(confirmation.start, utc(2030, 1, 1, 10, 0));
    }

    #[tokio::test]
    async fn link_duration_wins_over_requested_duration() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let req = BookingRequest {
            slug: Some("Intro Call".to_string()),
            duration_minutes: Some(15),
            ..request("2030-01-01T10:00:00Z")
        };
        let confirmation = handler.submit(req, now()).await.unwrap();

        assert_eq!(confirmation.end, utc(2030, 1, 1, 10, 45));
        let created = calendar.created();
        assert_eq!(
            created[0].description.as_deref(),
            Some("Talk about intro-call")
        );
    }

    #[tokio::test]
    async fn requested_duration_is_used_without_a_link() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let req = BookingRequest {
            duration_minutes: Some(60),
            end: Some("2030-01-01T11:00:00Z".to_string()),
            ..request("2030-01-01T10:00:00Z")
        };
        let confirmation = handler.submit(req, now()).await.unwrap();
        assert_eq!(confirmation.end, utc(2030, 1, 1, 11, 0));

        let too_long = BookingRequest {
            duration_minutes: Some(2000),
            ..request("2030-01-01T10:00:00Z")
        };
        assert!(matches!(
            handler.submit(too_long, now()).await,
            Err(SchedulingError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn mismatched_end_is_rejected() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let req = BookingRequest {
            end: Some("2030-01-01T12:00:00Z".to_string()),
            ..request("2030-01-01T10:00:00Z")
        };
        assert!(matches!(
            handler.submit(req, now()).await,
            Err(SchedulingError::ValidationError(_))
        ));
        assert_eq!(calendar.list_calls(), 0);
    }

    #[tokio::test]
    async fn slot_taken_since_selection_is_not_booked() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());
        calendar.set_busy(vec![busy(utc(2030, 1, 1, 10, 15), utc(2030, 1, 1, 10, 45))]);

        let err = handler
            .submit(request("2030-01-01T10:00:00Z"), now())
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::SlotNoLongerAvailable));
        assert_eq!(calendar.create_calls(), 0);
    }

    #[tokio::test]
    async fn availability_fetch_failure_is_reported() {
        let calendar = Arc::new(StubCalendar::default());
        calendar.fail_list.store(true, Ordering::SeqCst);
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let err = handler
            .submit(request("2030-01-01T10:00:00Z"), now())
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::AvailabilityFetchFailed(_)));
        assert_eq!(calendar.create_calls(), 0);
    }

    #[tokio::test]
    async fn event_creation_failure_is_attempted_once() {
        let calendar = Arc::new(StubCalendar::default());
        calendar.fail_create.store(true, Ordering::SeqCst);
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let err = handler
            .submit(request("2030-01-01T10:00:00Z"), now())
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::BookingFailed(ref m) if m.contains("insert rejected")));
        assert_eq!(calendar.create_calls(), 1);
    }

    #[tokio::test]
    async fn missing_calendar_is_unavailable() {
        let store = Arc::new(InMemoryLinkStore::new());
        let handler =
            BookingSubmissionHandler::new(None, LinkResolver::new(store), BusinessRules::default(), 30);

        assert!(matches!(
            handler.submit(request("2030-01-01T10:00:00Z"), now()).await,
            Err(SchedulingError::CalendarUnavailable)
        ));
    }

    #[tokio::test]
    async fn business_rules_are_rechecked_at_submission() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        // Saturday
        assert!(matches!(
            handler.submit(request("2030-01-05T10:00:00Z"), now()).await,
            Err(SchedulingError::ValidationError(_))
        ));
        // Before opening
        assert!(matches!(
            handler.submit(request("2030-01-01T07:00:00Z"), now()).await,
            Err(SchedulingError::ValidationError(_))
        ));
        assert_eq!(calendar.list_calls(), 0);
    }

    #[tokio::test]
    async fn past_slots_are_never_booked() {
        let calendar = Arc::new(StubCalendar::default());
        let rules = BusinessRules::default().with_past_policy(PastSlotPolicy::GrayOnly);
        let handler = handler_with(calendar.clone(), rules);

        let err = handler
            .submit(request("2030-01-01T10:00:00Z"), utc(2030, 1, 1, 12, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::ValidationError(_)));
        assert_eq!(calendar.list_calls(), 0);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let calendar = Arc::new(StubCalendar::default());
        let handler = handler_with(calendar.clone(), BusinessRules::default());

        let req = BookingRequest {
            slug: Some("nope".to_string()),
            ..request("2030-01-01T10:00:00Z")
        };
        assert!(matches!(
            handler.submit(req, now()).await,
            Err(SchedulingError::NotFound(_))
        ));
        assert_eq!(calendar.list_calls(), 0);
    }
}

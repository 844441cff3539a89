//! End-to-end console scenarios over an in-memory token store.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use soniy_admin_shared::{
        api::{self, endpoints, ApiError},
        audio_review::{ActionBlocked, AssetAction, AudioReview, SegmentsState},
        console::{Console, NoticeTone, Screen},
        models::{AudioFile, Manifest, Segment},
        router::PageKey,
        session::{MemoryStorage, TokenStorage},
        views::DashboardStats,
        SESSION_EXPIRED_MESSAGE,
    };

    fn audio_list() -> Vec<AudioFile> {
        let reply = api::interpret(
            200,
            &json!([
                { "id": 1, "original_filename": "a.mp3", "status": "uploaded" },
                { "id": 2, "original_filename": "b.mp3", "status": "ready", "segment_count": 8 },
                { "id": 3, "original_filename": "c.mp3", "status": "segmented", "segment_count": 5 },
                { "id": 4, "original_filename": "d.mp3", "status": "ready", "segment_count": 2 }
            ])
            .to_string(),
        )
        .expect("list reply");
        reply.decode().expect("decode audio list")
    }

    #[test]
    fn login_loads_dashboard_once_and_fills_stats() {
        let storage = MemoryStorage::default();
        let mut console = Console::boot(storage.clone());
        assert_eq!(console.screen(), Screen::Login);

        console.begin_login();
        let token: api::Reply =
            api::interpret(200, r#"{"access_token":"abc","token_type":"bearer"}"#).expect("login");
        let login: soniy_admin_shared::models::LoginResponse = token.decode().expect("token");
        let ticket = console.login_succeeded(&login.access_token).expect("login accepted");

        assert_eq!(storage.load().as_deref(), Some("abc"));
        assert_eq!(ticket.page, PageKey::Dashboard);
        assert_eq!(console.router().current_ticket(), ticket);
        assert_eq!(console.sync_route("dashboard"), None);

        let manifest: Manifest = api::interpret(
            200,
            r#"{"total_pages":48,"total_units":930,"total_segments":412,"version":3}"#,
        )
        .and_then(api::Reply::decode)
        .expect("manifest");
        let stats = DashboardStats::from(&manifest);
        assert_eq!((stats.pages, stats.units, stats.segments), (48, 930, 412));
        assert_eq!(stats.version, "v3");
    }

    #[test]
    fn list_call_answering_401_forces_login() {
        let storage = MemoryStorage::with_token("stale");
        let mut console = Console::boot(storage.clone());
        console.navigate(PageKey::Audio.as_str());

        let err = api::interpret(401, r#"{"detail":"Not authenticated"}"#).expect_err("401");
        assert_eq!(err, ApiError::SessionExpired);
        console.report(&err);

        assert_eq!(console.screen(), Screen::Login);
        assert_eq!(storage.load(), None);
        let notice = console.notice().expect("expiry notice");
        assert_eq!(notice.tone, NoticeTone::Error);
        assert_eq!(notice.text, SESSION_EXPIRED_MESSAGE);
    }

    #[test]
    fn uploaded_asset_cannot_be_cut() {
        let mut review = AudioReview::default();
        let generation = review.begin_reload();
        review.finish_reload(generation, Ok(audio_list()));

        assert!(!review.can_cut(1));
        assert_eq!(review.begin_action(1, AssetAction::Cut), Err(ActionBlocked::CutNotAllowed(1)));
        assert!(review.can_cut(2));
        assert!(review.can_cut(3));
    }

    #[test]
    fn ready_count_is_recomputed_on_every_reload() {
        let mut review = AudioReview::default();
        for _ in 0..3 {
            let generation = review.begin_reload();
            review.finish_reload(generation, Ok(audio_list()));
            let stats = review.stats();
            assert_eq!(stats.total, 4);
            assert_eq!(stats.ready, 2);
            assert_eq!(stats.segmented, 1);
            assert_eq!(stats.segments, 15);
        }
    }

    #[test]
    fn segments_render_in_index_order_with_exclusive_kinds() {
        let mut review = AudioReview::default();
        let generation = review.begin_reload();
        review.finish_reload(generation, Ok(audio_list()));
        let request = review.toggle(2).expect("expand");
        assert_eq!(endpoints::audio_segments(request.asset_id), "/admin/audio/files/2/segments");

        let segments: Vec<Segment> = api::interpret(
            200,
            &json!([
                { "id": 12, "segment_index": 2, "start_ms": 2000, "end_ms": 2600, "duration_ms": 600, "is_silence": false },
                { "id": 10, "segment_index": 0, "start_ms": 0, "end_ms": 1200, "duration_ms": 1200, "is_silence": false },
                { "id": 11, "segment_index": 1, "start_ms": 1200, "end_ms": 2000, "duration_ms": 800, "is_silence": true }
            ])
            .to_string(),
        )
        .and_then(api::Reply::decode)
        .expect("segments");
        review.finish_segments(request, Ok(segments));

        let Some(SegmentsState::Loaded(segments)) = review.card(2).map(|card| card.segments.clone())
        else {
            panic!("segments should be loaded");
        };
        assert!(segments.windows(2).all(|pair| pair[0].segment_index < pair[1].segment_index));
        assert_eq!(segments.iter().filter(|s| s.is_silence).count(), 1);
    }

    #[test]
    fn repeated_navigation_reloads_once_each() {
        let mut console = Console::boot(MemoryStorage::with_token("t"));
        let first = console.navigate("feedback").expect("feedback");
        let again = console.navigate("feedback").expect("feedback again");

        assert_eq!(again.seq, first.seq + 1);
        assert_eq!(console.router().title(), "Fikr-mulohazalar");
        let active = PageKey::ALL
            .iter()
            .filter(|page| console.router().is_active(**page))
            .count();
        assert_eq!(active, 1);
    }
}

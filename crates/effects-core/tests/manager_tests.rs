// Lifecycle tests driven by the virtual clock and the in-memory page.

use effects_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

type TestManager = EffectManager<TimerQueue, MemoryStage, StdRng>;

fn manager_with(stage: MemoryStage) -> TestManager {
    EffectManager::new(
        TimerQueue::new(),
        stage,
        StdRng::seed_from_u64(42),
        EffectConfig::default(),
    )
}

fn manager() -> TestManager {
    manager_with(MemoryStage::with_containers(1024.0))
}

fn visual_nodes(stage: &MemoryStage) -> Vec<&MemoryNode> {
    (0..stage.nodes_created())
        .filter_map(|i| stage.node(i))
        .filter(|n| matches!(n.kind, MemoryKind::Visual(_)))
        .collect()
}

#[test]
fn start_while_running_changes_nothing() {
    let mut m = manager();
    assert!(m.start_population(ElementKind::Ambient));
    let pop = m.population(ElementKind::Ambient);
    let (timer, generation) = (pop.spawn_timer(), pop.generation());
    let pending = m.scheduler().pending();

    assert!(!m.start_population(ElementKind::Ambient));
    let pop = m.population(ElementKind::Ambient);
    assert!(pop.is_running());
    assert_eq!(pop.spawn_timer(), timer);
    assert_eq!(pop.generation(), generation);
    assert_eq!(m.scheduler().pending(), pending);
    assert_eq!(m.scheduler().active_repeating(), 1);
}

#[test]
fn heart_burst_runs_for_its_window_then_stops() {
    let mut m = manager();
    assert!(m.start_population(ElementKind::Heart));
    let hearts = m.population(ElementKind::Heart);
    assert_eq!(hearts.kind(), ElementKind::Heart);
    assert!(hearts.window_timer().is_some());

    m.advance_to(0);
    assert_eq!(m.population(ElementKind::Heart).spawned_total(), 1);

    // burst ends at 19 * 200ms; ticks at 300..=3600 so far
    m.advance_to(3800);
    assert_eq!(m.population(ElementKind::Heart).spawned_total(), 20 + 12);

    m.advance_to(9999);
    let hearts = m.population(ElementKind::Heart);
    assert!(hearts.is_running());
    assert_eq!(hearts.spawned_total(), 20 + 33);

    m.advance_to(10_000);
    let hearts = m.population(ElementKind::Heart);
    assert!(!hearts.is_running());
    assert!(hearts.spawn_timer().is_none());
    assert!(hearts.window_timer().is_none());
    assert_eq!(m.scheduler().active_repeating(), 0);

    m.advance_to(30_000);
    let hearts = m.population(ElementKind::Heart);
    assert_eq!(hearts.spawned_total(), 20 + 10_000 / 300);
    assert_eq!(hearts.live_count(), 0);
}

#[test]
fn hearts_can_run_again_after_their_window() {
    let mut m = manager();
    m.start_population(ElementKind::Heart);
    m.advance_to(10_000);
    assert!(!m.population(ElementKind::Heart).is_running());

    assert!(m.start_population(ElementKind::Heart));
    m.advance_to(19_999);
    assert!(m.population(ElementKind::Heart).is_running());
    m.advance_to(20_000);
    assert!(!m.population(ElementKind::Heart).is_running());
    assert_eq!(m.population(ElementKind::Heart).spawned_total(), 2 * 53);
}

#[test]
fn element_is_removed_exactly_at_its_lifetime() {
    let mut m = manager();
    m.start_population(ElementKind::Heart);
    m.advance_to(0);
    let first = m
        .population(ElementKind::Heart)
        .elements()
        .next()
        .cloned()
        .expect("one heart spawned at t=0");
    assert_eq!(first.created_at_ms, 0.0);

    let ttl = first.ttl_ms as u64;
    m.advance_to(ttl - 1);
    assert!(m.population(ElementKind::Heart).get(first.id).is_some());
    m.advance_to(ttl);
    assert!(m.population(ElementKind::Heart).get(first.id).is_none());
}

#[test]
fn every_element_is_detached_exactly_once() {
    let mut m = manager();
    m.initialize();
    m.reveal_surprise();
    m.advance_to(7_000);
    m.handle_resize();
    m.advance_to(12_000);
    m.teardown();
    // stale retire tasks still fire here and must not touch anything
    m.advance_to(60_000);

    let visuals = visual_nodes(m.stage());
    assert!(!visuals.is_empty());
    assert!(visuals.iter().all(|n| n.detach_count == 1));
    assert!(visuals.iter().all(|n| n.parent.is_none()));
}

#[test]
fn teardown_twice_is_harmless() {
    let mut m = manager();
    m.initialize();
    m.start_population(ElementKind::Heart);
    m.advance_to(2_500);
    assert!(m.population(ElementKind::Ambient).live_count() > 0);

    m.teardown();
    m.teardown();
    for kind in ElementKind::ALL {
        let pop = m.population(kind);
        assert_eq!(pop.live_count(), 0);
        assert!(!pop.is_running());
    }
    assert_eq!(m.scheduler().active_repeating(), 0);

    m.advance_to(20_000);
    assert_eq!(m.population(ElementKind::Ambient).live_count(), 0);
    assert_eq!(m.population(ElementKind::Heart).live_count(), 0);
}

#[test]
fn resize_restarts_ambient_from_empty_with_one_timer() {
    let mut m = manager();
    m.initialize();
    m.advance_to(2_000);
    assert_eq!(m.population(ElementKind::Ambient).live_count(), 21 + 4);

    m.handle_resize();
    let ambient = m.population(ElementKind::Ambient);
    assert_eq!(ambient.live_count(), 0);
    assert!(ambient.is_running());
    assert_eq!(ambient.generation(), 1);
    assert_eq!(m.scheduler().active_repeating(), 1);

    // the old burst still has spawns queued at 2100, 2200, ...; only the new
    // generation's burst may act on them
    m.advance_to(2_099);
    assert_eq!(m.population(ElementKind::Ambient).live_count(), 1);
    m.advance_to(2_100);
    assert_eq!(m.population(ElementKind::Ambient).live_count(), 2);
}

#[test]
fn resize_events_are_debounced() {
    let mut m = manager();
    m.initialize();
    m.notify_resize();
    m.advance_to(100);
    m.notify_resize();
    m.advance_to(200);
    m.notify_resize();

    m.advance_to(449);
    assert_eq!(m.population(ElementKind::Ambient).generation(), 0);
    m.advance_to(450);
    assert_eq!(m.population(ElementKind::Ambient).generation(), 1);
    m.advance_to(5_000);
    assert_eq!(m.population(ElementKind::Ambient).generation(), 1);
    assert_eq!(m.scheduler().active_repeating(), 1);
}

#[test]
fn resize_uses_new_viewport_width() {
    let mut m = manager();
    m.initialize();
    m.advance_to(1_000);
    m.stage_mut().set_viewport_width(200.0);
    m.handle_resize();
    m.advance_to(3_000);
    assert!(m
        .population(ElementKind::Ambient)
        .elements()
        .all(|e| e.x_px >= 0.0 && e.x_px < 200.0));
}

#[test]
fn reveal_without_section_mutates_nothing() {
    let mut m = manager();
    let created = m.stage().nodes_created();
    m.trigger_reveal(None);
    assert_eq!(m.stage().nodes_created(), created);
    assert_eq!(m.scheduler().pending(), 0);
    m.advance_to(5_000);
    assert!(m.stage().scrolls().is_empty());
}

#[test]
fn reveal_scrolls_then_cascades_lines() {
    let mut stage = MemoryStage::with_containers(800.0);
    let section = stage.add_section(constants::REVEAL_SECTION_ID, 3);
    let lines = stage.message_lines(&section);
    let mut m = manager_with(stage);

    m.trigger_reveal(Some(section));
    assert!(m.stage().has_class(section, constants::SHOW_CLASS));

    m.advance_to(0);
    assert!(m.stage().is_revealed(lines[0]));
    assert!(!m.stage().is_revealed(lines[1]));

    m.advance_to(299);
    assert!(m.stage().scrolls().is_empty());
    assert!(m.stage().is_revealed(lines[1]));
    assert!(!m.stage().is_revealed(lines[2]));

    m.advance_to(400);
    assert_eq!(m.stage().scrolls(), &[section]);
    assert!(lines.iter().all(|l| m.stage().is_revealed(*l)));
}

#[test]
fn teardown_cancels_pending_reveal_steps() {
    let mut stage = MemoryStage::with_containers(800.0);
    let section = stage.add_section(constants::REVEAL_SECTION_ID, 3);
    let lines = stage.message_lines(&section);
    let mut m = manager_with(stage);

    m.trigger_reveal(Some(section));
    m.advance_to(0);
    assert!(m.stage().is_revealed(lines[0]));

    m.teardown();
    m.advance_to(5_000);
    assert!(m.stage().scrolls().is_empty());
    assert!(!m.stage().is_revealed(lines[1]));
    assert!(!m.stage().is_revealed(lines[2]));
}

#[test]
fn reveal_control_starts_hearts_even_without_section() {
    let mut m = manager();
    m.reveal_surprise();
    assert!(m.population(ElementKind::Heart).is_running());
    assert!(m.stage().scrolls().is_empty());
}

#[test]
fn missing_container_degrades_to_noop() {
    let mut m = manager_with(MemoryStage::new(800.0));
    m.initialize();
    assert!(!m.start_population(ElementKind::Heart));
    for kind in ElementKind::ALL {
        assert!(!m.population(kind).is_running());
    }
    assert_eq!(m.scheduler().pending(), 0);

    // once the container shows up, a later start works
    m.stage_mut().add_container(constants::HEART_CONTAINER_ID);
    assert!(m.start_population(ElementKind::Heart));
}

#[test]
fn stop_leaves_live_elements_to_finish() {
    let mut m = manager();
    m.initialize();
    m.advance_to(1_000);
    let live = m.population(ElementKind::Ambient).live_count();
    m.stop_population(ElementKind::Ambient);
    assert_eq!(m.population(ElementKind::Ambient).live_count(), live);
    m.advance_to(20_000);
    assert_eq!(m.population(ElementKind::Ambient).live_count(), 0);
    assert_eq!(m.population(ElementKind::Ambient).spawned_total(), live as u64);
}

#[test]
fn card_press_adds_ripple_and_settles() {
    let mut stage = MemoryStage::with_containers(800.0);
    let card = stage.add_card(Rect::new(0.0, 0.0, 200.0, 100.0));
    let mut m = manager_with(stage);

    m.press_card(0, Some((50.0, 40.0)));
    assert!(m.stage().has_class(card, constants::CLICKED_CLASS));
    let ripples = m.stage().children(card);
    assert_eq!(ripples.len(), 1);
    let expected = RippleGeometry::at(&Rect::new(0.0, 0.0, 200.0, 100.0), Some((50.0, 40.0)));
    match &m.stage().node(ripples[0]).unwrap().kind {
        MemoryKind::Ripple(g) => assert_eq!(*g, expected),
        other => panic!("expected ripple, got {other:?}"),
    }

    m.advance_to(599);
    assert!(m.stage().has_class(card, constants::CLICKED_CLASS));
    m.advance_to(600);
    assert!(!m.stage().has_class(card, constants::CLICKED_CLASS));
    assert!(m.stage().children(card).is_empty());
    assert_eq!(m.pending_presses(), 0);
}

#[test]
fn pressing_missing_card_is_ignored() {
    let mut m = manager();
    m.press_card(3, None);
    assert_eq!(m.pending_presses(), 0);
    assert_eq!(m.scheduler().pending(), 0);
}

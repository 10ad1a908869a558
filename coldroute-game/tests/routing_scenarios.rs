use coldroute_game::{
    Advance, CargoCatalog, CityConfig, Dispatcher, DisruptOutcome, DisruptionEntry, EdgeMutation,
    EdgeRef, EngineConfig, LinkConfig, Magnitude, NetworkConfig, QUICK_DISRUPTION_DELAY, Role,
    RouteError, RouteNetwork, ShipmentState, ShipmentStatus, Vehicle, minimax, possible_moves,
    score,
};

fn names(stops: &[&str]) -> Vec<String> {
    stops.iter().map(ToString::to_string).collect()
}

fn milk() -> Vehicle {
    CargoCatalog::default_config()
        .vehicle_for("milk", Some(10))
        .expect("milk is catalogued")
}

#[test]
fn delhi_to_chennai_takes_the_fewest_hops() {
    let mut dispatcher = Dispatcher::with_reference_map();
    let state = dispatcher
        .start_route("Delhi", "Chennai", Vehicle::new("Medicines", None, 100))
        .unwrap();
    assert_eq!(
        state.route(),
        names(&["Delhi", "Lucknow", "Kolkata", "Chennai"])
    );
    assert_eq!(state.cost, 0);
    assert!(state.disruptions.is_empty());
    assert!(!state.delivered);
    assert_eq!(state.status(), ShipmentStatus::InTransit);
}

#[test]
fn disruption_raises_the_next_hop_cost() {
    let mut network = RouteNetwork::reference();
    let state = ShipmentState::start(milk(), &names(&["Delhi", "Jaipur", "Ahmedabad"])).unwrap();

    let before: Vec<u32> = possible_moves(&state, &network)
        .unwrap()
        .iter()
        .map(|mv| mv.state.cost)
        .collect();
    assert_eq!(before, vec![5, 20, 35]);

    network
        .apply_disruption("Delhi", "Jaipur", 15, EdgeMutation::Symmetric)
        .unwrap();
    let after: Vec<u32> = possible_moves(&state, &network)
        .unwrap()
        .iter()
        .map(|mv| mv.state.cost)
        .collect();
    assert_eq!(after, vec![20, 35, 50]);

    let chosen = minimax(&state, 1, Role::Maximizing, &network).unwrap();
    assert_eq!(chosen.score, 20);
    let next = chosen.state.expect("a hop remains");
    assert_eq!(next.current, "Jaipur");
    assert_eq!(next.cost, 20);
    assert_eq!(next.vehicle.shelf_life, 30);
}

#[test]
fn evaluator_scenarios() {
    let mut delivered = ShipmentState::start(milk(), &names(&["Jaipur"])).unwrap();
    delivered.delivered = true;
    delivered.cost = 40;
    assert_eq!(score(&delivered), 60);

    let mut spoiled = ShipmentState::start(milk(), &names(&["Delhi", "Jaipur"])).unwrap();
    spoiled.vehicle.shelf_life = -1;
    assert_eq!(score(&spoiled), -100);
}

#[test]
fn advancing_reaches_a_terminal_state() {
    let mut dispatcher = Dispatcher::with_reference_map();
    let mut state = dispatcher
        .start_route("Mumbai", "Chennai", milk())
        .unwrap();
    let mut hops = 0;
    loop {
        match dispatcher.advance(&state).unwrap() {
            Advance::Moved(next) => {
                assert!(next.cost > state.cost);
                state = next;
                hops += 1;
            }
            Advance::Terminal { delivered } => {
                assert!(delivered);
                break;
            }
        }
        assert!(hops <= 8, "advance should terminate");
    }
    assert_eq!(state.current, "Chennai");
    assert_eq!(state.status(), ShipmentStatus::Delivered);
    assert!(state.vehicle.shelf_life > 0);
}

#[test]
fn quick_disruption_is_logged_and_reported() {
    let mut dispatcher = Dispatcher::with_reference_map();
    let state = dispatcher
        .start_route("Delhi", "Mumbai", milk())
        .unwrap();
    assert_eq!(state.route(), names(&["Delhi", "Jaipur", "Mumbai"]));

    let DisruptOutcome::Applied { state, .. } = dispatcher
        .disrupt_next_hop(&state, Magnitude::Fixed(QUICK_DISRUPTION_DELAY))
        .unwrap()
    else {
        panic!("disruption should apply to an in-transit shipment");
    };
    assert_eq!(
        state.disruptions,
        vec![DisruptionEntry::Event(
            "Fixed delay of 15 at edge Delhi-Jaipur".into()
        )]
    );

    let status = dispatcher.describe(&state).unwrap();
    assert_eq!(status.location, "Delhi");
    assert_eq!(status.eta, dispatcher.network().route_cost(&state.route()).unwrap());

    let snapshot = dispatcher.render_graph(&state);
    assert_eq!(snapshot.source.as_deref(), Some("Delhi"));
    assert_eq!(snapshot.destination.as_deref(), Some("Mumbai"));
    assert!(
        snapshot
            .edges
            .iter()
            .any(|e| e.from == "Delhi" && e.to == "Jaipur" && e.disrupted && e.weight == 20)
    );
}

#[test]
fn parsed_edges_feed_disruptions() {
    let mut dispatcher = Dispatcher::with_reference_map();
    let state = dispatcher
        .start_route("Delhi", "Chennai", milk())
        .unwrap();
    let edge = EdgeRef::parse(" lucknow-KOLKATA ").unwrap();
    assert_eq!(edge, EdgeRef::new("Lucknow", "Kolkata"));
    dispatcher
        .disrupt(&state, &edge, Magnitude::Fixed(5))
        .unwrap();
    assert_eq!(dispatcher.network().weight("Kolkata", "Lucknow"), Some(20));

    assert!(matches!(
        EdgeRef::parse("Delhi"),
        Err(RouteError::MalformedDisruptionInput { .. })
    ));
    assert!(matches!(
        dispatcher.disrupt(&state, &EdgeRef::new("Delhi", "Patna"), Magnitude::Fixed(5)),
        Err(RouteError::InvalidEdgeReference { .. })
    ));
}

#[test]
fn disconnected_maps_report_no_route() {
    let config = NetworkConfig {
        cities: vec![
            CityConfig {
                name: "Alpha".into(),
                coords: None,
                links: vec![LinkConfig {
                    to: "Beta".into(),
                    weight: 3,
                }],
            },
            CityConfig {
                name: "Beta".into(),
                coords: None,
                links: vec![],
            },
            CityConfig {
                name: "Gamma".into(),
                coords: None,
                links: vec![],
            },
        ],
    };
    let network = RouteNetwork::from_config(&config).unwrap();
    let mut dispatcher = Dispatcher::new(network, EngineConfig::default()).unwrap();
    assert_eq!(
        dispatcher
            .start_route("alpha", "gamma", Vehicle::new("Milk", None, 50))
            .unwrap_err(),
        RouteError::NoRouteFound {
            origin: "Alpha".into(),
            destination: "Gamma".into()
        }
    );
    assert!(
        dispatcher
            .start_route("Alpha", "Beta", Vehicle::new("Milk", None, 50))
            .is_ok()
    );
}

#[test]
fn invalid_engine_config_is_rejected() {
    let config = EngineConfig {
        search_depth: 0,
        ..EngineConfig::default()
    };
    assert!(Dispatcher::new(RouteNetwork::reference(), config).is_err());
}

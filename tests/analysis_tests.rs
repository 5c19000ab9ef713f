use muon_truth_studio::analysis::{process_stream, AnalysisTask, HfMuonTask, WEfficiencyTask};
use muon_truth_studio::output::RecordEmitter;
use muon_truth_studio::parser::{Event, EventReader, EventResult, McParticle, Track};
use muon_truth_studio::utils::config::{
    HfConfig, WEfficiencyConfig, H_EVENT_COUNTER_RECO, H_EVENT_COUNTER_SIM, H_MU_PT_RECO,
    H_MU_PT_RECO_D, H_PT_TRUTH, H_Y_PT, H_Y_PT_TRUTH, RECORD_HEADER,
};
use pretty_assertions::assert_eq;
use std::io::{self, Cursor};

fn track(id: i64, label: Option<i64>) -> Track {
    Track {
        id,
        eta: -3.0,
        pt: 5.0,
        p: 45.5,
        phi: 0.25,
        n_clusters: 10,
        p_dca: 0.5,
        chi2: 1.5,
        chi2_match_mch_mid: 2.5,
        chi2_match_mch_mft: 12.0,
        mc_particle_id: label,
    }
}

fn particle(id: i64, pdg: i32, status: i32, eta: f64, mother: Option<i64>) -> McParticle {
    McParticle {
        id,
        pdg_code: pdg,
        status_code: status,
        pt: 5.0,
        eta,
        mother_id: mother,
        mc_collision_id: Some(0),
    }
}

fn hf_task() -> HfMuonTask<Vec<u8>> {
    let emitter = RecordEmitter::new(Vec::new()).unwrap();
    HfMuonTask::new(&HfConfig::default(), emitter).unwrap()
}

fn run_hf(events: &[Event]) -> HfMuonTask<Vec<u8>> {
    let mut task = hf_task();
    for event in events {
        task.process(event).unwrap();
    }
    task
}

fn finish_records(task: HfMuonTask<Vec<u8>>) -> Vec<String> {
    let (_, sink) = task.finish().unwrap();
    String::from_utf8(sink)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn entries(task: &HfMuonTask<Vec<u8>>, name: &str) -> u64 {
    task.histograms().get_1d(name).unwrap().entries
}

#[test]
fn test_ambiguous_tracks_counted_twice_recorded_once() {
    let event = Event {
        id: 1,
        tracks: vec![track(1, Some(42)), track(2, Some(42))],
        mc_particles: vec![
            particle(7, 421, 85, -3.2, None),
            particle(42, 13, 85, -3.0, Some(7)),
        ],
    };

    let task = run_hf(&[event]);

    assert_eq!(entries(&task, H_MU_PT_RECO), 2);
    assert_eq!(entries(&task, H_MU_PT_RECO_D), 2);
    assert_eq!(task.stats().records_emitted, 1);

    let lines = finish_records(task);
    assert_eq!(
        lines,
        vec![
            RECORD_HEADER.to_string(),
            "42,-3,5,45.5,0.25,421,10,0.5,1.5,2.5,12,1".to_string(),
        ]
    );
}

#[test]
fn test_non_charm_parent_not_heavy_flavor() {
    let event = Event {
        id: 1,
        tracks: vec![track(1, Some(42))],
        mc_particles: vec![
            particle(7, 511, 91, -3.2, None),
            particle(42, 13, 91, -3.0, Some(7)),
        ],
    };

    let task = run_hf(&[event]);

    assert_eq!(entries(&task, H_MU_PT_RECO), 1);
    assert_eq!(entries(&task, H_MU_PT_RECO_D), 0);

    let lines = finish_records(task);
    assert_eq!(lines[1], "42,-3,5,45.5,0.25,511,10,0.5,1.5,2.5,12,0");
}

#[test]
fn test_central_muon_still_classified_and_recorded() {
    let event = Event {
        id: 1,
        tracks: vec![track(1, Some(42))],
        mc_particles: vec![
            particle(7, -411, 83, -1.1, None),
            particle(42, -13, 91, -1.0, Some(7)),
        ],
    };

    let task = run_hf(&[event]);

    assert_eq!(entries(&task, H_MU_PT_RECO), 0);
    assert_eq!(entries(&task, H_MU_PT_RECO_D), 1);

    let lines = finish_records(task);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("42,"));
    assert!(lines[1].contains(",411,"));
    assert!(lines[1].ends_with(",1"));
}

#[test]
fn test_non_muons_never_touch_aggregates_or_records() {
    let pdgs = [11, -11, 211, -211, 2212, 22, 14, -14, 421];
    let particles: Vec<McParticle> = pdgs
        .iter()
        .enumerate()
        .map(|(i, &pdg)| particle(i as i64 + 100, pdg, 85, -3.0, None))
        .collect();
    let tracks = particles.iter().map(|p| track(p.id, Some(p.id))).collect();
    let event = Event {
        id: 1,
        tracks,
        mc_particles: particles,
    };

    let task = run_hf(&[event]);

    assert_eq!(entries(&task, H_MU_PT_RECO), 0);
    assert_eq!(entries(&task, H_MU_PT_RECO_D), 0);
    assert_eq!(entries(&task, H_EVENT_COUNTER_RECO), 1);
    assert_eq!(finish_records(task).len(), 1);
}

#[test]
fn test_muon_without_mother_recorded_as_non_prompt() {
    let event = Event {
        id: 1,
        tracks: vec![track(1, Some(42))],
        mc_particles: vec![particle(42, 13, 85, -3.0, None)],
    };

    let task = run_hf(&[event]);
    assert_eq!(entries(&task, H_MU_PT_RECO), 1);
    assert_eq!(entries(&task, H_MU_PT_RECO_D), 0);

    let lines = finish_records(task);
    assert_eq!(lines[1], "42,-3,5,45.5,0.25,0,10,0.5,1.5,2.5,12,0");
}

#[test]
fn test_dedup_spans_events() {
    let make_event = |id: u64, muons: &[i64]| Event {
        id,
        tracks: muons.iter().map(|&m| track(m, Some(m))).collect(),
        mc_particles: muons.iter().map(|&m| particle(m, 13, 91, -3.0, None)).collect(),
    };

    let events = vec![
        make_event(1, &[1, 2]),
        make_event(2, &[2, 3]),
        make_event(3, &[1, 3, 4]),
    ];

    let task = run_hf(&events);

    assert_eq!(entries(&task, H_EVENT_COUNTER_RECO), 3);
    assert_eq!(entries(&task, H_MU_PT_RECO), 7);
    assert_eq!(task.selected().len(), 4);
    assert_eq!(task.stats().records_emitted, 4);

    let ids: Vec<String> = finish_records(task)
        .iter()
        .skip(1)
        .map(|l| l.split(',').next().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[test]
fn test_stream_skips_malformed_events_and_continues() {
    let input = [
        r#"{"id":1,"tracks":[{"id":1,"eta":-3.0,"pt":5.0,"p":45.0,"phi":0.1,"n_clusters":9,"p_dca":0.4,"chi2":1.0,"chi2_match_mch_mid":1.0,"chi2_match_mch_mft":1.0,"mc_particle_id":42}],"mc_particles":[{"id":42,"pdg_code":13,"status_code":91,"pt":5.0,"eta":-3.0}]}"#,
        r#"{"id":2,"tracks":[{"id":1,"eta":-3.0,"pt":5.0,"p":45.0,"phi":0.1,"n_clusters":9,"p_dca":0.4,"chi2":1.0,"chi2_match_mch_mid":1.0,"chi2_match_mch_mft":1.0,"mc_particle_id":77}],"mc_particles":[]}"#,
        r#"{"id":3,"tracks":"broken"}"#,
        r#"{"id":4,"tracks":[],"mc_particles":[{"id":5,"pdg_code":13,"status_code":91,"pt":5.0,"eta":-3.0,"mother_id":6}]}"#,
        r#"{"id":5,"tracks":[],"mc_particles":[]}"#,
    ]
    .join("\n");

    let mut task = hf_task();
    let summary = process_stream(&mut task, EventReader::new(Cursor::new(input))).unwrap();

    assert_eq!(summary.events_processed, 3);
    assert_eq!(summary.events_failed, 2);
    assert_eq!(summary.records_emitted, 1);
    assert_eq!(summary.task, "hf");
    assert_eq!(entries(&task, H_EVENT_COUNTER_RECO), 3);
}

#[test]
fn test_stream_isolates_invalid_utf8_line() {
    let good = |id: u64, muon: i64| {
        format!(
            r#"{{"id":{id},"tracks":[{{"id":1,"eta":-3.0,"pt":5.0,"p":45.0,"phi":0.1,"n_clusters":9,"p_dca":0.4,"chi2":1.0,"chi2_match_mch_mid":1.0,"chi2_match_mch_mft":1.0,"mc_particle_id":{muon}}}],"mc_particles":[{{"id":{muon},"pdg_code":13,"status_code":91,"pt":5.0,"eta":-3.0}}]}}"#
        )
    };

    let mut input = Vec::new();
    input.extend_from_slice(good(1, 10).as_bytes());
    input.extend_from_slice(b"\n{\"id\":2,\"x\":\"\xff\xfe\"}\n");
    input.extend_from_slice(good(3, 30).as_bytes());
    input.push(b'\n');

    let mut task = hf_task();
    let summary = process_stream(&mut task, EventReader::new(Cursor::new(input))).unwrap();

    assert_eq!(summary.events_processed, 2);
    assert_eq!(summary.events_failed, 1);
    assert_eq!(summary.records_emitted, 2);
}

#[test]
fn test_dangling_mother_keeps_rest_of_event() {
    let event = Event {
        id: 1,
        tracks: vec![track(1, Some(42)), track(2, Some(7))],
        mc_particles: vec![
            particle(7, 211, 91, -3.0, Some(999)),
            particle(42, 13, 91, -3.0, None),
        ],
    };

    let mut task = hf_task();
    let events: Vec<io::Result<EventResult>> = vec![Ok(Ok(event))];
    let summary = process_stream(&mut task, events).unwrap();

    assert_eq!(summary.events_processed, 1);
    assert_eq!(summary.events_failed, 0);
    assert_eq!(summary.records_emitted, 1);

    let lines = finish_records(task);
    assert_eq!(lines[1], "42,-3,5,45.5,0.25,0,10,0.5,1.5,2.5,12,0");
}

#[test]
fn test_extreme_pdg_code_is_not_a_muon() {
    let event = Event {
        id: 1,
        tracks: vec![track(1, Some(42)), track(2, Some(43))],
        mc_particles: vec![
            particle(41, i32::MIN, i32::MIN, -3.0, None),
            particle(42, i32::MIN, 91, -3.0, None),
            particle(43, 13, 91, -3.0, Some(41)),
        ],
    };

    let task = run_hf(&[event]);

    assert_eq!(task.stats().muon_tracks, 1);
    assert_eq!(entries(&task, H_MU_PT_RECO_D), 0);

    let lines = finish_records(task);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "43,-3,5,45.5,0.25,2147483648,10,0.5,1.5,2.5,12,0");
}

#[test]
fn test_w_efficiency_reco_and_sim() {
    let mut task = WEfficiencyTask::new(&WEfficiencyConfig::default()).unwrap();
    let event = Event {
        id: 1,
        tracks: vec![track(1, Some(10)), track(2, Some(11)), track(3, None)],
        mc_particles: vec![
            particle(9, 24, 22, -3.0, None),
            particle(10, 13, 23, -3.0, Some(9)),
            particle(11, 13, 91, -3.0, Some(9)),
            particle(12, -13, 23, -1.0, Some(9)),
        ],
    };

    task.process(&event).unwrap();
    let histos = task.histograms();

    assert_eq!(histos.get_1d(H_EVENT_COUNTER_RECO).unwrap().entries, 1);
    assert_eq!(histos.get_1d(H_EVENT_COUNTER_SIM).unwrap().entries, 1);
    // Only the hard-process muon behind a track
    assert_eq!(histos.get_2d(H_Y_PT).unwrap().entries, 1);
    // Muons 10 and 12 are hard-process, only 10 is forward
    assert_eq!(histos.get_2d(H_Y_PT_TRUTH).unwrap().entries, 1);
    assert_eq!(histos.get_1d(H_PT_TRUTH).unwrap().entries, 2);
    assert_eq!(task.stats().muon_tracks, 2);
}

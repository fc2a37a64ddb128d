//! Canned upstream used by the page and route tests

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use tank01_client::{Upstream, UpstreamError};

/// Upstream that answers from a table keyed by endpoint name.
///
/// Endpoints without an entry answer `{"body": []}`. A response can be
/// narrowed to one parameter value with [`FakeUpstream::with_param`].
#[derive(Default)]
pub struct FakeUpstream {
    responses: HashMap<String, Vec<(Option<(String, String)>, Result<Value, u16>)>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, endpoint: &str, body: Value) -> Self {
        self.responses.entry(endpoint.to_string()).or_default().push((None, Ok(body)));
        self
    }

    pub fn with_param(mut self, endpoint: &str, key: &str, value: &str, body: Value) -> Self {
        self.responses
            .entry(endpoint.to_string())
            .or_default()
            .push((Some((key.to_string(), value.to_string())), Ok(body)));
        self
    }

    pub fn failing(mut self, endpoint: &str, status: u16) -> Self {
        self.responses.entry(endpoint.to_string()).or_default().push((None, Err(status)));
        self
    }

    /// Endpoints called so far, in order
    pub fn endpoints(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(e, _)| e.clone()).collect()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(e, _)| e == endpoint).count()
    }

    /// Parameters of the most recent call to `endpoint`
    pub fn last_params(&self, endpoint: &str) -> Option<Vec<(String, String)>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(e, _)| e == endpoint)
            .map(|(_, params)| params.clone())
    }
}

#[async_trait]
impl Upstream for FakeUpstream {
    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push((
            endpoint.to_string(),
            params.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));

        let entries = match self.responses.get(endpoint) {
            Some(entries) => entries,
            None => return Ok(json!({ "body": [] })),
        };

        let matched = entries
            .iter()
            .find(|(filter, _)| match filter {
                Some((key, value)) => params.iter().any(|(k, v)| *k == key.as_str() && v == value),
                None => false,
            })
            .or_else(|| entries.iter().find(|(filter, _)| filter.is_none()));

        match matched {
            Some((_, Ok(body))) => Ok(body.clone()),
            Some((_, Err(status))) => Err(UpstreamError::Status {
                endpoint: endpoint.to_string(),
                status: *status,
                body: r#"{"message":"canned failure"}"#.to_string(),
            }),
            None => Ok(json!({ "body": [] })),
        }
    }
}

/// A small ADP list: two QBs, RBs, WRs, a TE, a kicker and a defense
pub fn sample_adp() -> Value {
    json!({ "body": { "adpList": [
        { "longName": "Christian McCaffrey", "posADP": "RB1", "overallADP": "1.2", "playerID": "3117251" },
        { "longName": "Ja'Marr Chase", "posADP": "WR1", "overallADP": "2.0", "playerID": "4362628" },
        { "longName": "Bijan Robinson", "posADP": "RB2", "overallADP": "3.1", "playerID": "4430807" },
        { "longName": "CeeDee Lamb", "posADP": "WR2", "overallADP": "4.5", "playerID": "4241389" },
        { "longName": "Josh Allen", "posADP": "QB1", "overallADP": "20.3", "playerID": "3918298" },
        { "longName": "Travis Kelce", "posADP": "TE1", "overallADP": "30.8", "playerID": "15847" },
        { "longName": "Lamar Jackson", "posADP": "QB2", "overallADP": "25.0", "playerID": "3916387" },
        { "longName": "Justin Tucker", "posADP": "PK1", "overallADP": "140.0", "playerID": "15683" },
        { "longName": "San Francisco 49ers DST", "posADP": "DST1", "overallADP": "120.0" }
    ]}})
}

pub fn sample_teams() -> Value {
    json!({ "body": [
        { "teamAbv": "SF", "teamName": "San Francisco 49ers" },
        { "teamAbv": "CIN", "teamName": "Cincinnati Bengals" },
        { "teamAbv": "ATL", "teamName": "Atlanta Falcons" },
        { "teamAbv": "DAL", "teamName": "Dallas Cowboys" },
        { "teamAbv": "BUF", "teamName": "Buffalo Bills" },
        { "teamAbv": "KC", "teamName": "Kansas City Chiefs" },
        { "teamAbv": "BAL", "teamName": "Baltimore Ravens" },
        { "teamAbv": "LAR", "teamName": "Los Angeles Rams" }
    ]})
}

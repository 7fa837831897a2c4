/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use structmat::{run, JobError, JobOptions};

fn run_file(path: &str) -> Result<serde_json::Value, JobError> {
    let options = JobOptions {
        input_file: path.to_string(),
        output: None,
    };
    let mut out: Vec<u8> = Vec::new();
    run(&options, &mut out)?;
    Ok(serde_json::from_slice(&out)?)
}

#[test]
fn test_lower_column() {
    let report = run_file("./tests/jobs/lower_column.json").unwrap();

    let accepted: Vec<bool> = report["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["accepted"].as_bool().unwrap())
        .collect();
    assert_eq!(accepted, vec![true, false, true, true, true, true, false]);

    // Column 1 goes ( 0 8 2 ) -> ( 0 16 4 ) -> ( 0 8 2 ) -> ( 0 64 0 )
    let rows: Vec<Vec<f64>> = serde_json::from_value(report["rows"].clone()).unwrap();
    assert_eq!(
        rows,
        vec![vec![1., 0., 0.], vec![-4., 64., 0.], vec![7., 0., 3.]]
    );
    assert_eq!(report["non_zeros"], 5);
    assert!(report["capacity"].as_u64().unwrap() >= 5);
    assert_eq!(report["declared"]["lower"], true);
    assert_eq!(report["detected"]["lower"], true);
    assert_eq!(report["detected"]["upper"], false);

    // The rejected step says why
    let error = report["steps"][1]["error"].as_str().unwrap();
    assert!(error.contains("column 1"));
    assert!(report["steps"][0].get("error").is_none());
}

#[test]
fn test_upper_row() {
    let report = run_file("./tests/jobs/upper_row.json").unwrap();

    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps[0]["accepted"], false);
    assert_eq!(steps[1]["accepted"], true);
    assert_eq!(steps[2]["accepted"], true);

    let rows: Vec<Vec<f64>> = serde_json::from_value(report["rows"].clone()).unwrap();
    assert_eq!(
        rows,
        vec![vec![-3., -4., -6.], vec![0., -4., -5.], vec![0., 0., -6.]]
    );
    assert_eq!(report["non_zeros"], 6);
    assert_eq!(report["declared"]["upper"], true);
}

#[test]
fn test_invalid_step() {
    let r = run_file("./tests/jobs/invalid_step.json");
    assert!(matches!(r, Err(JobError::InvalidStep { index: 0, .. })));
}

#[test]
fn test_missing_file() {
    let r = run_file("./tests/jobs/does_not_exist.json");
    assert!(matches!(r, Err(JobError::Io { .. })));
}

use crate::controller::View;
use crate::errors::{Severity, TallyError};
use crate::models::{ActivitySummary, TallyForm};
use reqwest::Url;

const PROFILE_BASE: &str = "https://github.com";
pub const NO_ACTIVITY: &str = "No public activity found for this user.";

/// What the result region should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    ValidationError(String),
    ServiceError { message: String, severity: Severity },
    Empty,
    Summary(ActivitySummary),
}

impl From<TallyError> for RenderState {
    fn from(err: TallyError) -> Self {
        if err.is_validation() {
            RenderState::ValidationError(err.to_string())
        } else {
            RenderState::ServiceError {
                message: err.to_string(),
                severity: err.severity(),
            }
        }
    }
}

pub fn render(state: &RenderState) -> String {
    match state {
        RenderState::ValidationError(message) => {
            format!(r#"<span class="error">{}</span>"#, escape(message))
        }
        RenderState::ServiceError { message, severity } => {
            let class = match severity {
                Severity::Advisory => "advisory",
                Severity::Error => "error",
            };
            format!(r#"<span class="{class}">{}</span>"#, escape(message))
        }
        RenderState::Empty => format!(r#"<span class="info">{NO_ACTIVITY}</span>"#),
        RenderState::Summary(summary) => render_summary(summary),
    }
}

fn render_summary(summary: &ActivitySummary) -> String {
    let name = escape(&summary.identity);
    let href = escape(&profile_url(&summary.identity));
    let counts = &summary.counts;
    format!(
        r#"<strong>Results for <a href="{href}" target="_blank" rel="noopener">{name}</a>:</strong>
<ul>
  <li><strong>Commits:</strong> {}</li>
  <li><strong>Pull Requests Opened:</strong> {}</li>
  <li><strong>Issues Opened:</strong> {}</li>
</ul>"#,
        counts.commits, counts.pull_requests_opened, counts.issues_opened
    )
}

/// Profile link with the identity percent-encoded as one path segment.
pub fn profile_url(identity: &str) -> String {
    let Ok(mut url) = Url::parse(PROFILE_BASE) else {
        return PROFILE_BASE.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(identity);
    }
    url.into()
}

pub fn render_page(form: &TallyForm, view: &View) -> String {
    let loading = if view.busy { "" } else { " hidden" };
    INDEX_HTML
        .replace("{{USERNAME}}", &escape(&form.username))
        .replace("{{START}}", &escape(&form.start_date))
        .replace("{{END}}", &escape(&form.end_date))
        .replace("{{LOADING_ATTR}}", loading)
        .replace("{{RESULTS}}", &view.results)
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Contribution Tally</title>
  <style>
    :root {
      --bg: #f4f6f8;
      --ink: #24292f;
      --card: #ffffff;
      --accent: #2f4858;
      --error: #c63b2b;
      --advisory: #d97706;
      --shadow: 0 18px 40px rgba(47, 72, 88, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 20px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    form {
      display: grid;
      gap: 12px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
    }

    input {
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.25);
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    #loading {
      color: #6b645d;
    }

    .error {
      color: var(--error);
    }

    .advisory {
      color: var(--advisory);
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Contribution Tally</h1>
    <form id="contrib-form" method="post" action="/tally">
      <label>GitHub username
        <input name="username" value="{{USERNAME}}" autocomplete="off" />
      </label>
      <label>Start date
        <input name="start-date" value="{{START}}" placeholder="YYYY-MM-DD" />
      </label>
      <label>End date
        <input name="end-date" value="{{END}}" placeholder="YYYY-MM-DD" />
      </label>
      <button type="submit">Count contributions</button>
    </form>
    <div id="loading"{{LOADING_ATTR}}>Loading...</div>
    <div id="results">{{RESULTS}}</div>
  </main>

  <script>
    const form = document.getElementById('contrib-form');
    const loading = document.getElementById('loading');
    const results = document.getElementById('results');

    form.addEventListener('submit', () => {
      results.innerHTML = '';
      loading.hidden = false;
    });
  </script>
</body>
</html>
"#;

//! Render the classified report as a self-contained HTML page.
//!
//! Presentation only: a repository dropdown filter, one table per repository
//! (multi-upgrade branches use rowspan), and a modal that shows the branch's
//! detail text behind a question-mark icon.

use crate::decode::NOT_AVAILABLE;
use crate::report::{BranchRecord, Report, RepositoryRecord};

const NO_EXTRA_INFO: &str = "No extra information available";

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Renovate PR-Report</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { color: #2c3e50; }
        .filter-container { margin: 20px 0; }
        .repository-dropdown { padding: 10px; font-size: 16px; }
        table { width: 100%; border-collapse: collapse; margin-top: 20px; z-index: 1; }
        table, th, td { border: 1px solid #bdc3c7; }
        th, td { padding: 10px; text-align: left; }
        th { background-color: #ecf0f1; }
        .hidden { display: none; }
        .modal { background-color: rgba(0,0,0,0.8); display: none; z-index: 2; left: 0; top: 0;
                 width: 100%; height: 100%; overflow: auto; position: fixed; }
        .modal-content { background-color: #fefefe; margin: 10% auto; padding: 20px;
                         border: 1px solid #888; width: 80%; max-width: 800px;
                         border-radius: 8px; position: relative; }
        .close { color: #aaa; position: absolute; top: 10px; right: 20px; font-size: 28px;
                 font-weight: bold; cursor: pointer; }
        .close:hover, .close:focus { color: #000; text-decoration: none; cursor: pointer; }
        .question-icon { cursor: pointer; font-size: 18px; margin-left: 5px; color: #3498db;
                         vertical-align: middle; }
        .question-icon:hover { color: #217dbb; }
    </style>
    <script>
        function filterByRepository() {
            const selectedRepository = document.getElementById("repositoryDropdown").value;
            const tables = document.querySelectorAll(".repository-table");
            tables.forEach(table => {
                if (selectedRepository === "all" || table.dataset.repository === selectedRepository) {
                    table.classList.remove("hidden");
                } else {
                    table.classList.add("hidden");
                }
            });
        }
        function showModal(helpInfo) {
            const modal = document.getElementById('resultModal');
            const modalContent = document.getElementById('modalContent');
            modalContent.innerHTML = helpInfo;
            modal.style.display = 'block';
        }
        function closeModal() {
            document.getElementById('resultModal').style.display = 'none';
        }
        window.onclick = function(event) {
            var modal = document.getElementById('resultModal');
            if (event.target == modal) {
                modal.style.display = "none";
            }
        }
    </script>
</head>
<body>
    <h1>Renovate PR-Report</h1>
"#;

const TABLE_HEAD: &str = r#"<thead>
<tr>
    <th>PR Title</th>
    <th>Branch Name</th>
    <th>PR Status</th>
    <th>Dependency Name</th>
    <th>Current</th>
    <th>New</th>
</tr>
</thead>
"#;

const MODAL: &str = r#"<div id="resultModal" class="modal">
    <div class="modal-content">
        <span class="close" onclick="closeModal()">&times;</span>
        <div id="modalContent"></div>
    </div>
</div>
"#;

/// Render the full report page.
pub fn render(report: &Report) -> String {
  let mut out = String::with_capacity(16 * 1024);
  out.push_str(PAGE_HEAD);

  out.push_str("    <div class=\"filter-container\">\n");
  out.push_str("        <label for=\"repositoryDropdown\">Filter by Repository:</label>\n");
  out.push_str(
    "        <select id=\"repositoryDropdown\" class=\"repository-dropdown\" onchange=\"filterByRepository()\">\n",
  );
  out.push_str("            <option value=\"all\">All</option>\n");
  for repo in &report.repositories {
    let name = escape_html(&repo.repository);
    out.push_str(&format!(
      "            <option value=\"{name}\">{name}</option>\n"
    ));
  }
  out.push_str("        </select>\n    </div>\n");
  out.push_str(MODAL);

  for repo in &report.repositories {
    render_repository_table(&mut out, repo);
  }

  out.push_str("</body>\n</html>\n");
  out
}

fn render_repository_table(out: &mut String, repo: &RepositoryRecord) {
  let name = escape_html(&repo.repository);
  out.push_str(&format!(
    "<table class=\"repository-table\" data-repository=\"{name}\">\n"
  ));
  out.push_str(&format!("<caption class=\"repository\">{name}</caption>\n"));
  out.push_str(TABLE_HEAD);
  out.push_str("<tbody>\n");
  for branch in &repo.branches {
    render_branch_rows(out, branch);
  }
  out.push_str("</tbody>\n</table>\n");
}

fn render_branch_rows(out: &mut String, branch: &BranchRecord) {
  let title = escape_html(branch.title.as_deref().unwrap_or(NOT_AVAILABLE));
  let branch_name = escape_html(branch.branch_name.as_deref().unwrap_or(NOT_AVAILABLE));
  let detail = if branch.detail.is_empty() {
    NO_EXTRA_INFO
  } else {
    &branch.detail
  };
  let state_cell = format!(
    "{}<span class=\"question-icon\" title=\"Click for more info\" onclick=\"showModal('{}')\">&#x2753;</span>",
    branch.state.as_str(),
    escape_modal(detail)
  );

  match branch.primary_upgrade() {
    Some(primary) => {
      let rowspan = branch.upgrades.len();
      out.push_str(&format!(
        "<tr>\n<td rowspan={rowspan}>{title}</td>\n<td rowspan={rowspan}>{branch_name}</td>\n<td rowspan={rowspan}>{state_cell}</td>\n{}\n</tr>\n",
        upgrade_cells(primary)
      ));
      for upgrade in branch.auxiliary_upgrades() {
        out.push_str(&format!("<tr>\n{}\n</tr>\n", upgrade_cells(upgrade)));
      }
    }
    None => {
      out.push_str(&format!(
        "<tr>\n<td>{title}</td>\n<td>{branch_name}</td>\n<td>{state_cell}</td>\n<td>{NOT_AVAILABLE}</td>\n<td>{NOT_AVAILABLE}</td>\n<td>{NOT_AVAILABLE}</td>\n</tr>\n"
      ));
    }
  }
}

fn upgrade_cells(upgrade: &crate::decode::Upgrade) -> String {
  format!(
    "<td>{}</td>\n<td>{}</td>\n<td>{}</td>",
    escape_html(upgrade.package_name.as_deref().unwrap_or(NOT_AVAILABLE)),
    escape_html(upgrade.current_version.as_deref().unwrap_or(NOT_AVAILABLE)),
    escape_html(upgrade.new_version.as_deref().unwrap_or(NOT_AVAILABLE)),
  )
}

fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      other => out.push(other),
    }
  }
  out
}

/// Escape detail text for embedding in the single-quoted showModal argument.
/// `<br>` separators pass through so the modal renders line breaks.
fn escape_modal(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '"' => out.push_str("&quot;"),
      other => out.push(other),
    }
  }
  out
}

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Business Agent</title>
<style>
  body { font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }
  section { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; margin-bottom: 1.5rem; }
  textarea { width: 100%; height: 9rem; }
  table { border-collapse: collapse; margin-top: .5rem; }
  td, th { border: 1px solid #ccc; padding: .2rem .5rem; font-size: .9rem; }
  .status { margin: .5rem 0; }
</style>
</head>
<body>
<h1>🤖 AI Business Agent</h1>
<p>Draft humanized responses or parse addresses into columns for Google Sheets.</p>

<section>
  <h2>✍️ Draft Response</h2>
  <label for="draft-input">Paste the content here:</label>
  <textarea id="draft-input"></textarea>
  <button id="draft-button">Generate Response</button>
  <div class="status" id="draft-status"></div>
  <label for="draft-output">AI Response / Debug Output:</label>
  <textarea id="draft-output" readonly></textarea>
</section>

<section>
  <h2>📄 Parse Addresses</h2>
  <label for="csv-input">Upload CSV (1 column of full addresses)</label>
  <input type="file" id="csv-input" accept=".csv,text/csv">
  <div id="input-preview"></div>
  <button id="parse-button" disabled>Parse Addresses</button>
  <div class="status" id="parse-status"></div>
  <div id="parsed-preview"></div>
  <a id="download" style="display:none">⬇️ Download Parsed CSV</a>
</section>

<script>
const $ = (id) => document.getElementById(id);

function table(columns, rows) {
  const esc = (s) => String(s).replace(/[&<>"]/g, (c) => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;'}[c]));
  const head = '<tr>' + columns.map((c) => '<th>' + esc(c) + '</th>').join('') + '</tr>';
  const body = rows.map((r) => '<tr>' + r.map((c) => '<td>' + esc(c) + '</td>').join('') + '</tr>').join('');
  return '<table>' + head + body + '</table>';
}

$('draft-button').onclick = async () => {
  const text = $('draft-input').value;
  if (!text.trim()) { $('draft-status').textContent = 'Please enter some text first.'; return; }
  $('draft-status').textContent = 'Crafting your response...';
  const res = await fetch('/api/draft', {
    method: 'POST',
    headers: { 'content-type': 'application/json' },
    body: JSON.stringify({ text }),
  });
  const data = await res.json();
  $('draft-status').textContent = '✅ Response Generated (or Error Below)';
  $('draft-output').value = data.display;
};

let upload = null;

$('csv-input').onchange = async () => {
  const file = $('csv-input').files[0];
  $('download').style.display = 'none';
  $('parsed-preview').innerHTML = '';
  if (!file) { upload = null; $('parse-button').disabled = true; return; }
  upload = await file.text();
  const res = await fetch('/api/preview', { method: 'POST', body: upload });
  if (!res.ok) { $('parse-status').textContent = await res.text(); $('parse-button').disabled = true; return; }
  const data = await res.json();
  $('parse-status').textContent = '';
  $('input-preview').innerHTML = '<p>Preview of Uploaded Data:</p>' + table(data.columns, data.input);
  $('parse-button').disabled = false;
};

$('parse-button').onclick = async () => {
  $('parse-status').textContent = 'Parsing addresses...';
  const [csv, preview] = await Promise.all([
    fetch('/api/parse', { method: 'POST', body: upload }).then((r) => r.text()),
    fetch('/api/preview', { method: 'POST', body: upload }).then((r) => r.json()),
  ]);
  $('parse-status').textContent = '✅ Parsing Complete!';
  $('parsed-preview').innerHTML = table(
    ['Street Address', 'City, State, ZIP'],
    preview.parsed.map((p) => [p['Street Address'], p['City, State, ZIP']]),
  );
  const link = $('download');
  link.href = URL.createObjectURL(new Blob([csv], { type: 'text/csv' }));
  link.download = 'parsed_addresses.csv';
  link.style.display = 'inline';
};
</script>
</body>
</html>
"#;

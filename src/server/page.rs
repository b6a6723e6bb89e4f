//! Dashboard page. The browser only draws what the API returns: the SVG chart, the KPI
//! strings and the tooltip state. Selection, resize and pointer events go back to the server.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Population Dashboard</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 1200px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .controls { margin: 12px 0; }
    .cards { display: flex; gap: 14px; flex-wrap: wrap; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; min-width: 200px; }
    .card .label { color: #666; font-size: 0.9rem; }
    .card .value { font-size: 1.6rem; font-weight: 600; margin-top: 4px; }
    #Scatterplot { width: 100%; height: 520px; margin-top: 18px; }
    .tooltip { position: absolute; background: #fff; border: 1px solid silver; padding: 10px;
               text-align: justify; pointer-events: none; opacity: 0; white-space: pre-line; }
  </style>
</head>
<body>
  <h1>Population Dashboard</h1>

  <div class="controls">
    <label for="year">Year</label>
    <select id="year"></select>
  </div>

  <div class="cards">
    <div class="card"><div class="label">Total Population (000s)</div><div class="value" id="kpi-total">0</div></div>
    <div class="card"><div class="label">Average Population Density</div><div class="value" id="kpi-density">0.00</div></div>
    <div class="card"><div class="label">Average Population Growth Rate</div><div class="value" id="kpi-growth">0.00</div></div>
  </div>

  <div id="Scatterplot" class="Scatterplot"></div>
  <div id="tooltip" class="tooltip"></div>

  <script>
    const yearEl = document.getElementById('year');
    const chartEl = document.getElementById('Scatterplot');
    const tooltipEl = document.getElementById('tooltip');

    function applyTooltip(state) {
      if (state.state === 'visible') {
        const c = state.content;
        tooltipEl.textContent =
          'Year: ' + c.year + '\n' +
          'Region: ' + c.region + '\n' +
          'Country: ' + c.country + '\n' +
          'Population: ' + c.population_thousands + '\n' +
          'Population Density: ' + c.population_density + '\n' +
          'Population Growth Rate: ' + (c.population_growth_rate == null ? 'n/a' : c.population_growth_rate);
        tooltipEl.style.left = state.left + 'px';
        tooltipEl.style.top = state.top + 'px';
        tooltipEl.style.opacity = 1;
      } else {
        tooltipEl.style.opacity = 0;
      }
    }

    function pointer(payload) {
      fetch('/api/pointer', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      }).then(r => r.ok ? r.json() : null).then(state => { if (state) applyTooltip(state); });
    }

    function bindPoints() {
      chartEl.querySelectorAll('circle[data-point]').forEach(circle => {
        const point = Number(circle.dataset.point);
        circle.addEventListener('mouseover', e => pointer({ event: 'enter', point, x: e.pageX, y: e.pageY }));
        circle.addEventListener('mousemove', e => pointer({ event: 'move', point, x: e.pageX, y: e.pageY }));
        circle.addEventListener('mouseleave', () => pointer({ event: 'leave' }));
      });
    }

    function apply(view) {
      if (yearEl.options.length !== view.options.length) {
        yearEl.innerHTML = '';
        view.options.forEach(option => {
          const el = document.createElement('option');
          el.value = String(option);
          el.textContent = String(option);
          yearEl.appendChild(el);
        });
      }
      yearEl.value = String(view.selection);
      document.getElementById('kpi-total').textContent = view.kpi_display.total_population;
      document.getElementById('kpi-density').textContent = view.kpi_display.average_density;
      document.getElementById('kpi-growth').textContent = view.kpi_display.average_growth_rate;
      chartEl.innerHTML = view.svg;
      bindPoints();
      applyTooltip(view.tooltip);
    }

    function refresh() {
      fetch('/api/dashboard').then(r => r.json()).then(apply);
    }

    yearEl.addEventListener('change', () => {
      fetch('/api/selection', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ year: yearEl.value }),
      }).then(r => r.json()).then(apply);
    });

    let resizeTimer = null;
    function reportSize() {
      const box = chartEl.getBoundingClientRect();
      fetch('/api/resize', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ width: box.width, height: box.height }),
      }).then(() => {
        if (resizeTimer) clearTimeout(resizeTimer);
        resizeTimer = setTimeout(refresh, 300);
      });
    }
    window.addEventListener('resize', reportSize);

    reportSize();
    refresh();
  </script>
</body>
</html>
"#;

use crate::config::DateRange;
use crate::core::constants::{columns, dimensions, display, top_n};
use crate::core::error::Ga4Error;
use crate::pipeline::ReportSet;
use crate::summary::{Headline, channel_display_table, format_report_date, format_thousands};
use crate::table::{Cell, Table};
use crate::transform::{ReportKind, top_channels, top_events, top_pages};
use serde_json::{Value, json};
use std::fs;
use std::io;

/// Constants for dashboard styling and layout
mod dashboard_constants {
    /// Chart.js CDN URL for rendering charts
    pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

    /// Series colors, cycled for pie slices and scatter points
    pub const PALETTE: [&str; 10] = [
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ];

    /// Ends of the sequential scale bars are colored on, lowest value first
    pub const SCALE_LOW: (f64, f64, f64) = (198.0, 219.0, 239.0);
    pub const SCALE_HIGH: (f64, f64, f64) = (8.0, 48.0, 107.0);

    pub const USERS_COLOR: &str = "#1f77b4";
    pub const SESSIONS_COLOR: &str = "#ff7f0e";
    pub const EVENTS_COLOR: &str = "#059669";

    pub const NOT_ENOUGH_SCATTER_DATA: &str =
        "No hay suficientes datos para el gráfico de dispersión";
}

/// Everything the dashboard renders
#[derive(Debug)]
pub struct DashboardData<'a> {
    /// Name shown in the title
    pub display_name: String,
    /// Numeric GA4 property id
    pub property_id: String,
    /// Reporting period
    pub period: DateRange,
    /// Per-section tables or failures
    pub reports: &'a ReportSet,
    /// Timestamp when the dashboard was generated
    pub timestamp: String,
}

/// Error type for dashboard generation
#[derive(Debug)]
pub enum DashboardError {
    FileWrite(io::Error),
    Serialization(String),
}

impl std::fmt::Display for DashboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardError::FileWrite(e) => write!(f, "Failed to write dashboard file: {e}"),
            DashboardError::Serialization(e) => write!(f, "Failed to serialize data: {e}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::FileWrite(e) => Some(e),
            DashboardError::Serialization(_) => None,
        }
    }
}

impl From<io::Error> for DashboardError {
    fn from(e: io::Error) -> Self {
        DashboardError::FileWrite(e)
    }
}

impl From<Ga4Error> for DashboardError {
    fn from(e: Ga4Error) -> Self {
        DashboardError::Serialization(e.to_string())
    }
}

/// A canvas and the Chart.js configuration drawn on it
#[derive(Debug)]
struct ChartSpec {
    canvas_id: &'static str,
    config: Value,
}

/// Rendered markup of one dashboard section plus its charts
#[derive(Debug, Default)]
struct Section {
    html: String,
    charts: Vec<ChartSpec>,
}

impl Section {
    fn markup(html: String) -> Self {
        Self {
            html,
            charts: Vec::new(),
        }
    }
}

/// HTML dashboard generator for GA4 report tables
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard(data: &DashboardData, output_path: &str) -> Result<(), DashboardError> {
        let html_content = Self::generate_html_content(data)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Generate the complete HTML document content
    pub fn generate_html_content(data: &DashboardData) -> Result<String, DashboardError> {
        let sections = [
            Self::generate_performance_section(data)?,
            Self::generate_channels_section(data)?,
            Self::generate_pages_section(data)?,
            Self::generate_events_section(data)?,
            Self::generate_devices_section(data)?,
        ];

        let charts: Vec<Value> = sections
            .iter()
            .flat_map(|section| &section.charts)
            .map(|chart| json!({ "id": chart.canvas_id, "config": chart.config }))
            .collect();
        let charts_json = serde_json::to_string(&charts)
            .map_err(|e| DashboardError::Serialization(e.to_string()))?
            .replace("</", "<\\/");

        let body_sections = sections
            .iter()
            .map(|section| section.html.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Analytics - {title}</title>
    <script src="{cdn}"></script>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {header}
        {glossary}
        {body_sections}
    </div>
    <script>window.dashboardCharts = {charts_json};</script>
    <script>{js}</script>
</body>
</html>"#,
            title = escape_html(&data.display_name),
            cdn = dashboard_constants::CHART_JS_CDN,
            css = Self::generate_css(),
            header = Self::generate_header_section(data),
            glossary = Self::generate_glossary_section(),
            js = Self::generate_javascript(),
        ))
    }

    fn generate_css() -> &'static str {
        r#"
        :root {
            --primary-color: #2563eb;
            --success-color: #059669;
            --warning-color: #d97706;
            --error-color: #dc2626;
            --bg-color: #f8fafc;
            --card-bg: #ffffff;
            --border-color: #e2e8f0;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }

        .header {
            margin-bottom: 2rem;
            padding: 2rem;
            background: linear-gradient(135deg, var(--primary-color), #3b82f6);
            color: white;
            border-radius: 12px;
            box-shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
        }

        .header h1 { font-size: 2.25rem; margin-bottom: 0.5rem; font-weight: 700; }
        .header p { font-size: 1rem; opacity: 0.95; }
        .header .updated { margin-top: 1rem; font-size: 0.875rem; opacity: 0.85; }

        .glossary {
            background: var(--card-bg);
            border: 1px solid var(--border-color);
            border-radius: 12px;
            padding: 1rem 1.5rem;
            margin-bottom: 2rem;
        }
        .glossary summary { cursor: pointer; font-weight: 600; }
        .glossary h4 { margin: 1rem 0 0.5rem; }
        .glossary ul { padding-left: 1.25rem; }

        .section { margin-bottom: 3rem; }
        .section-title { font-size: 1.5rem; font-weight: 700; margin-bottom: 1rem; }

        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 1rem;
            margin-bottom: 1.5rem;
        }

        .stat-card {
            background: var(--card-bg);
            padding: 1.25rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }
        .stat-value { font-size: 1.75rem; font-weight: 700; }
        .stat-label {
            color: var(--text-secondary);
            font-size: 0.8rem;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }

        .chart-row {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(400px, 1fr));
            gap: 1.5rem;
        }

        .chart-container {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            margin-bottom: 1.5rem;
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
        }
        .chart-title { font-size: 1.1rem; font-weight: 600; margin-bottom: 1rem; }

        table.detail { width: 100%; border-collapse: collapse; font-size: 0.875rem; }
        table.detail th, table.detail td {
            padding: 0.5rem;
            border-bottom: 1px solid var(--border-color);
            text-align: left;
        }
        table.detail th { color: var(--text-secondary); font-weight: 600; }

        .notice {
            padding: 1rem 1.5rem;
            border-radius: 12px;
            color: var(--warning-color);
            background-color: #fffbeb;
            border: 1px solid #fde68a;
        }
        .notice.info { color: var(--primary-color); background-color: #eff6ff; border-color: #bfdbfe; }

        @media (max-width: 768px) {
            .container { padding: 1rem; }
            .header h1 { font-size: 1.75rem; }
            .chart-row { grid-template-columns: 1fr; }
        }
        "#
    }

    /// Title, property, period, headline totals and generation time
    fn generate_header_section(data: &DashboardData) -> String {
        let totals = match data.reports.headline() {
            Some(headline) => format!(
                r#"
                <p>{} Usuarios totales: {}</p>
                <p>{} Sesiones totales: {}</p>"#,
                display::USERS_EMOJI,
                headline.users_display(),
                display::SESSIONS_EMOJI,
                headline.sessions_display()
            ),
            None => String::new(),
        };

        format!(
            r#"
            <div class="header">
                <h1>{hotel} Analytics - {name}</h1>
                <p>ID del hotel: {property}</p>
                <p>{calendar} Periodo: {start} a {end}</p>{totals}
                <p class="updated"><strong>Dashboard conectado a Google Analytics 4</strong> | Última actualización: {timestamp}</p>
            </div>
            "#,
            hotel = display::HOTEL_EMOJI,
            name = escape_html(&data.display_name),
            property = escape_html(&data.property_id),
            calendar = display::CALENDAR_EMOJI,
            start = data.period.start_str(),
            end = data.period.end_str(),
            timestamp = escape_html(&data.timestamp),
        )
    }

    fn generate_glossary_section() -> &'static str {
        r#"
            <details class="glossary">
                <summary>Glosario de métricas</summary>
                <h4>Métricas principales de performance</h4>
                <ul>
                    <li><strong>Usuarios activos</strong>: Número total de usuarios que interactuaron con el sitio web</li>
                    <li><strong>Usuarios nuevos</strong>: Usuarios que visitaron el sitio por primera vez</li>
                    <li><strong>Sesiones</strong>: Periodos de interacción continua en el sitio web</li>
                    <li><strong>Sesiones comprometidas</strong>: Sesiones de calidad (duración &gt;10 segundos o múltiples páginas)</li>
                    <li><strong>Tasa de compromiso</strong>: % de sesiones de calidad (sesiones comprometidas / sesiones totales)</li>
                    <li><strong>Tasa de rebote</strong>: % de sesiones de baja calidad (duración &lt;10 segundos, se calcula como 1 - tasa de compromiso)</li>
                    <li><strong>Duración promedio de sesión</strong>: Tiempo promedio que los usuarios permanecen en el sitio</li>
                    <li><strong>Vistas de página por sesión</strong>: Número promedio de páginas vistas por sesión</li>
                </ul>
                <h4>Términos de canales</h4>
                <ul>
                    <li><strong>Fuente/Medio</strong>: Origen y método del tráfico (ej: Google / orgánico)</li>
                    <li><strong>Canal</strong>: Combinación de fuente y medio</li>
                </ul>
                <h4>Interpretación rápida</h4>
                <p><strong>Métricas positivas</strong> (más alto = mejor): Tasa de compromiso, Duración de sesión, Vistas por sesión</p>
                <p><strong>Métricas negativas</strong> (más bajo = mejor): Tasa de rebote</p>
            </details>
        "#
    }

    /// The section's table when it is available and has rows
    fn available<'a>(data: &DashboardData<'a>, kind: ReportKind) -> Option<&'a Table> {
        data.reports.table(kind).filter(|table| !table.is_empty())
    }

    fn generate_performance_section(data: &DashboardData) -> Result<Section, DashboardError> {
        let title = "Performance general";
        let Some(performance) = Self::available(data, ReportKind::Performance) else {
            return Ok(Self::no_data_section(title, ReportKind::Performance));
        };

        let headline = Headline::from_performance(performance)?;
        let cards = [
            Self::generate_stat_card(&headline.users_display(), "Usuarios totales"),
            Self::generate_stat_card(&headline.engagement_display(), "Tasa de compromiso"),
            Self::generate_stat_card(&headline.bounce_display(), "Tasa de rebote"),
            Self::generate_stat_card(&headline.duration_display(), "Duración promedio"),
            Self::generate_stat_card(&headline.pages_per_session_display(), "Páginas/Sesión"),
        ]
        .join("");

        let dates: Vec<String> = performance
            .texts(dimensions::DATE)?
            .iter()
            .map(|d| format_report_date(d))
            .collect();

        let trend = ChartSpec {
            canvas_id: "trafficTrendChart",
            config: json!({
                "type": "line",
                "data": {
                    "labels": dates,
                    "datasets": [
                        {
                            "label": "Usuarios activos",
                            "data": performance.numbers(columns::USUARIOS_ACTIVOS)?,
                            "borderColor": dashboard_constants::USERS_COLOR,
                            "borderWidth": 3,
                            "fill": false
                        },
                        {
                            "label": "Sesiones",
                            "data": performance.numbers(columns::SESIONES)?,
                            "borderColor": dashboard_constants::SESSIONS_COLOR,
                            "borderWidth": 3,
                            "fill": false
                        }
                    ]
                },
                "options": {
                    "responsive": true,
                    "scales": {
                        "x": { "title": { "display": true, "text": "Fecha" } },
                        "y": { "title": { "display": true, "text": "Cantidad" } }
                    }
                }
            }),
        };

        Ok(Section {
            html: format!(
                r#"
            <div class="section">
                <h2 class="section-title">{title}</h2>
                <div class="stats-grid">{cards}</div>
                {chart}
            </div>
            "#,
                chart = Self::generate_chart_container("Tendencias de tráfico", trend.canvas_id)
            ),
            charts: vec![trend],
        })
    }

    fn generate_channels_section(data: &DashboardData) -> Result<Section, DashboardError> {
        let title = "Comportamiento por canal";
        let Some(channels) = Self::available(data, ReportKind::Channels) else {
            return Ok(Self::no_data_section(title, ReportKind::Channels));
        };

        let top = top_channels(channels, top_n::CHANNELS)?;
        let bar = ChartSpec {
            canvas_id: "channelsChart",
            config: json!({
                "type": "bar",
                "data": {
                    "labels": top.texts(columns::CANAL)?,
                    "datasets": [{
                        "label": "Sesiones (color: tasa de compromiso)",
                        "data": top.numbers(columns::SESIONES)?,
                        "backgroundColor": Self::scale_colors(&top.numbers(columns::TASA_COMPROMISO)?)
                    }]
                },
                "options": { "responsive": true, "plugins": { "legend": { "display": false } } }
            }),
        };

        let display = channel_display_table(channels)?;
        let detail = Self::generate_detail_table(
            &display,
            &[
                (columns::CANAL, "Canal"),
                (columns::SESIONES, "Sesiones"),
                (columns::SESIONES_COMPROMETIDAS, "Sesiones comprometidas"),
                (columns::TASA_COMPROMISO, "Compromiso"),
                (columns::TASA_REBOTE, "Rebote"),
                (columns::DURACION_PROMEDIO_SESION, "Duración"),
            ],
        )?;

        Ok(Section {
            html: format!(
                r#"
            <div class="section">
                <h2 class="section-title">{title}</h2>
                <div class="chart-row">
                    {chart}
                    <div class="chart-container">
                        <h3 class="chart-title">Métricas detalladas</h3>
                        {detail}
                    </div>
                </div>
            </div>
            "#,
                chart =
                    Self::generate_chart_container("Sesiones y engagement por canal", bar.canvas_id)
            ),
            charts: vec![bar],
        })
    }

    fn generate_pages_section(data: &DashboardData) -> Result<Section, DashboardError> {
        let title = "Análisis de páginas";
        let Some(pages) = Self::available(data, ReportKind::Pages) else {
            return Ok(Self::no_data_section(title, ReportKind::Pages));
        };

        let top = top_pages(pages, top_n::PAGES)?;
        let bar = ChartSpec {
            canvas_id: "topPagesChart",
            config: json!({
                "type": "bar",
                "data": {
                    "labels": top.texts(dimensions::PAGE_PATH)?,
                    "datasets": [{
                        "label": "Vistas (color: duración de compromiso)",
                        "data": top.numbers(columns::VISTAS_PAGINA)?,
                        "backgroundColor": Self::scale_colors(&top.numbers(columns::DURACION_COMPROMISO_USUARIO)?)
                    }]
                },
                "options": { "indexAxis": "y", "responsive": true }
            }),
        };
        let mut charts = vec![bar];

        let scatter_html = if pages.len() > 1 {
            let paths = pages.texts(dimensions::PAGE_PATH)?;
            let durations = pages.numbers(columns::DURACION_COMPROMISO_USUARIO)?;
            let interactions = pages.numbers(columns::CONTEO_EVENTOS)?;
            let datasets: Vec<Value> = paths
                .iter()
                .zip(durations.iter().zip(&interactions))
                .enumerate()
                .map(|(i, (path, (x, y)))| {
                    json!({
                        "label": path,
                        "data": [{ "x": x, "y": y }],
                        "backgroundColor": Self::color(i),
                        "pointRadius": 8
                    })
                })
                .collect();

            let scatter = ChartSpec {
                canvas_id: "pagesScatterChart",
                config: json!({
                    "type": "scatter",
                    "data": { "datasets": datasets },
                    "options": {
                        "responsive": true,
                        "scales": {
                            "x": { "title": { "display": true, "text": "Duración" } },
                            "y": { "title": { "display": true, "text": "Interacciones" } }
                        }
                    }
                }),
            };
            let html = Self::generate_chart_container("Tiempo vs Interacciones", scatter.canvas_id);
            charts.push(scatter);
            html
        } else {
            format!(
                r#"<div class="chart-container"><h3 class="chart-title">Tiempo vs Interacciones</h3><div class="notice info">{}</div></div>"#,
                dashboard_constants::NOT_ENOUGH_SCATTER_DATA
            )
        };

        Ok(Section {
            html: format!(
                r#"
            <div class="section">
                <h2 class="section-title">{title}</h2>
                <div class="chart-row">
                    {bar}
                    {scatter_html}
                </div>
            </div>
            "#,
                bar = Self::generate_chart_container("Top páginas visitadas", "topPagesChart")
            ),
            charts,
        })
    }

    fn generate_events_section(data: &DashboardData) -> Result<Section, DashboardError> {
        let title = "Eventos y conversiones";
        let Some(events) = Self::available(data, ReportKind::Events) else {
            return Ok(Self::no_data_section(title, ReportKind::Events));
        };

        let top_bar = top_events(events, top_n::EVENTS_BAR)?;
        let top_pie = top_events(events, top_n::EVENTS_PIE)?;

        let bar = ChartSpec {
            canvas_id: "eventsChart",
            config: json!({
                "type": "bar",
                "data": {
                    "labels": top_bar.texts(dimensions::EVENT_NAME)?,
                    "datasets": [{
                        "label": "Conteo de eventos",
                        "data": top_bar.numbers(columns::CONTEO_EVENTOS)?,
                        "backgroundColor": dashboard_constants::EVENTS_COLOR
                    }]
                },
                "options": { "indexAxis": "y", "responsive": true }
            }),
        };
        let pie = Self::pie_chart(
            "eventUsersChart",
            top_pie.texts(dimensions::EVENT_NAME)?,
            top_pie.numbers(columns::USUARIOS_TOTALES)?,
        );

        Ok(Section {
            html: format!(
                r#"
            <div class="section">
                <h2 class="section-title">{title}</h2>
                <div class="chart-row">
                    {bar}
                    {pie}
                </div>
            </div>
            "#,
                bar = Self::generate_chart_container("Eventos más frecuentes", bar.canvas_id),
                pie = Self::generate_chart_container("Usuarios por evento", pie.canvas_id),
            ),
            charts: vec![bar, pie],
        })
    }

    fn generate_devices_section(data: &DashboardData) -> Result<Section, DashboardError> {
        let title = "Análisis por dispositivo";
        let Some(devices) = Self::available(data, ReportKind::Devices) else {
            return Ok(Self::no_data_section(title, ReportKind::Devices));
        };

        let pie = Self::pie_chart(
            "devicesChart",
            devices.texts(dimensions::DEVICE_CATEGORY)?,
            devices.numbers(columns::SESIONES)?,
        );

        Ok(Section {
            html: format!(
                r#"
            <div class="section">
                <h2 class="section-title">{title}</h2>
                {chart}
            </div>
            "#,
                chart = Self::generate_chart_container("Distribución por dispositivo", pie.canvas_id)
            ),
            charts: vec![pie],
        })
    }

    fn no_data_section(title: &str, kind: ReportKind) -> Section {
        Section::markup(format!(
            r#"
            <div class="section">
                <h2 class="section-title">{title}</h2>
                <div class="notice">{}</div>
            </div>
            "#,
            no_data_message(kind)
        ))
    }

    /// Generate a single statistics card
    fn generate_stat_card(value: &str, label: &str) -> String {
        format!(
            r#"
                    <div class="stat-card">
                        <div class="stat-value">{}</div>
                        <div class="stat-label">{}</div>
                    </div>"#,
            escape_html(value),
            label
        )
    }

    fn generate_chart_container(title: &str, canvas_id: &str) -> String {
        format!(
            r#"<div class="chart-container"><h3 class="chart-title">{title}</h3><canvas id="{canvas_id}"></canvas></div>"#
        )
    }

    /// Render selected columns of a display table with localized headers
    fn generate_detail_table(
        table: &Table,
        headers: &[(&str, &str)],
    ) -> Result<String, DashboardError> {
        let indices = headers
            .iter()
            .map(|(column, _)| table.column_index(column))
            .collect::<Result<Vec<_>, _>>()?;

        let head = headers
            .iter()
            .map(|(_, label)| format!("<th>{label}</th>"))
            .collect::<String>();

        let body = table
            .rows()
            .iter()
            .map(|row| {
                let cells = indices
                    .iter()
                    .map(|&i| match &row[i] {
                        Cell::Number(n) => format!("<td>{}</td>", format_thousands(*n)),
                        Cell::Text(s) => format!("<td>{}</td>", escape_html(s)),
                    })
                    .collect::<String>();
                format!("<tr>{cells}</tr>")
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!(
            r#"<table class="detail"><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>"#
        ))
    }

    fn pie_chart(canvas_id: &'static str, labels: Vec<String>, values: Vec<f64>) -> ChartSpec {
        let colors = Self::palette(labels.len());
        ChartSpec {
            canvas_id,
            config: json!({
                "type": "pie",
                "data": {
                    "labels": labels,
                    "datasets": [{ "data": values, "backgroundColor": colors }]
                },
                "options": { "responsive": true, "plugins": { "legend": { "position": "bottom" } } }
            }),
        }
    }

    fn color(index: usize) -> &'static str {
        dashboard_constants::PALETTE[index % dashboard_constants::PALETTE.len()]
    }

    fn palette(len: usize) -> Vec<&'static str> {
        (0..len).map(Self::color).collect()
    }

    /// Sequential scale from the lowest to the highest value; equal values take the high end
    fn scale_colors(values: &[f64]) -> Vec<String> {
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        let span = max - min;
        let (low, high) = (dashboard_constants::SCALE_LOW, dashboard_constants::SCALE_HIGH);

        values
            .iter()
            .map(|value| {
                let t = if span > 0.0 { (value - min) / span } else { 1.0 };
                let lerp = |from: f64, to: f64| (from + (to - from) * t).round() as u8;
                format!(
                    "rgb({}, {}, {})",
                    lerp(low.0, high.0),
                    lerp(low.1, high.1),
                    lerp(low.2, high.2)
                )
            })
            .collect()
    }

    fn generate_javascript() -> &'static str {
        r#"
        document.addEventListener('DOMContentLoaded', function() {
            if (typeof Chart === 'undefined' || !window.dashboardCharts) {
                return;
            }
            window.dashboardCharts.forEach(function(chart) {
                const ctx = document.getElementById(chart.id);
                if (ctx) {
                    new Chart(ctx, chart.config);
                }
            });
        });
        "#
    }
}

/// "No data" notice for a section without a usable table
pub fn no_data_message(kind: ReportKind) -> String {
    format!("No hay datos de {} disponibles", kind.label())
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

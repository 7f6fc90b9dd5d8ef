//! Static dashboard configuration shared by the web app and the proxy server

/// Static dashboard configuration
pub struct Config {
    pub name: &'static str,
    pub tagline: &'static str,

    /// Route the browser fetches; the proxy serves the upstream body here
    pub data_path: &'static str,
    /// Column names and expense policy the proxy was configured with
    pub schema_path: &'static str,
    /// Spreadsheet script endpoint the proxy relays
    pub upstream_url: &'static str,

    pub schema: SchemaDefaults,
    pub labels: Labels,
}

/// Canonical column names of the yearly sheet
pub struct SchemaDefaults {
    pub year_key: &'static str,
    pub income_key: &'static str,
    /// Only positive category values count towards total expense
    pub positive_expenses_only: bool,
}

/// User-visible text
pub struct Labels {
    pub overview_tab: &'static str,
    pub load_error: &'static str,
    pub proxy_error: &'static str,
}

pub static CONFIG: Config = Config {
    name: "Painel Financeiro",
    tagline: "Ganhos e despesas por ano",

    data_path: "/api/finance",
    schema_path: "/api/finance/schema",
    upstream_url: "https://script.google.com/macros/s/AKfycbzbsjALT2rVI32pL1bvFfVyD95agZnWmjjd_0vzx12ZtHXTOOINq6jGB9xonCaT7FTc/exec",

    schema: SchemaDefaults {
        year_key: "YEAR",
        income_key: "GANHO BRUTO",
        positive_expenses_only: true,
    },

    labels: Labels {
        overview_tab: "Visão geral",
        load_error: "Erro ao carregar dados",
        proxy_error: "Erro ao buscar dados",
    },
};

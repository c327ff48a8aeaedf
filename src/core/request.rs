use chrono::NaiveDate;

/// Date format expected by the PTAX OData parameters.
pub const PTAX_DATE_FORMAT: &str = "%m-%d-%Y";

const DOLLAR_CURRENCY: &str = "USD";

/// Build the PTAX endpoint URL for `currency_code` on `date`.
///
/// USD goes through `CotacaoDolarPeriodo` with a one-day period; every other
/// code goes through `CotacaoMoedaAberturaOuIntermediario`. The code is
/// upper-cased but otherwise passed through unvalidated.
pub fn build_url(base_url: &str, currency_code: &str, date: NaiveDate) -> String {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    let day = date.format(PTAX_DATE_FORMAT);
    let code = currency_code.to_uppercase();

    if code == DOLLAR_CURRENCY {
        format!(
            "{base}CotacaoDolarPeriodo(dataInicial=@dataInicial,dataFinalCotacao=@dataFinalCotacao)\
             ?@dataInicial='{day}'&@dataFinalCotacao='{day}'&$top=100&$format=json\
             &$select=cotacaoCompra,cotacaoVenda,dataHoraCotacao"
        )
    } else {
        format!(
            "{base}CotacaoMoedaAberturaOuIntermediario(codigoMoeda=@codigoMoeda,dataCotacao=@dataCotacao)\
             ?@codigoMoeda='{code}'&@dataCotacao='{day}'&$format=json\
             &$select=cotacaoCompra,cotacaoVenda,dataHoraCotacao,tipoBoletim"
        )
    }
}

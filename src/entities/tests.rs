//! Tests for entity decoding

use super::*;
use crate::decode::{decode, FromJson};
use crate::error::Error;
use crate::types::ApiVersion;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use test_case::test_case;

fn processo_json() -> Value {
    json!({
        "numero_cnj": "8690473-18.2023.4.01.4200",
        "titulo_polo_ativo": "Ministério Público Federal",
        "titulo_polo_passivo": "Nogueira Cavallero da Silva e outros",
        "ano_inicio": 2023,
        "data_inicio": "2023-04-01",
        "data_ultima_movimentacao": "2023-04-01",
        "quantidade_movimentacoes": 1,
        "fontes_tribunais_estao_arquivadas": false,
        "data_ultima_verificacao": "2023-04-01T13:45:30+00:00",
        "tipo_match": "NOME",
        "match_fontes": {"tribunal": true, "diario_oficial": false},
        "tempo_desde_ultima_verificacao": "há 29 minutos",
        "fontes": [
            {
                "id": 15399,
                "processo_fonte_id": 222514338,
                "descricao": "TRF1 - 1º grau",
                "nome": "Tribunal Regional Federal da 1ª Região",
                "sigla": "TRF1",
                "tipo": "TRIBUNAL",
                "data_inicio": "2023-04-01",
                "data_ultima_movimentacao": "2023-04-01",
                "segredo_justica": null,
                "arquivado": null,
                "status_predito": "ATIVO",
                "grau": 1,
                "grau_formatado": "Primeiro Grau",
                "fisico": false,
                "sistema": "PJE",
                "capa": {
                    "classe": "AUTO DE PRISAO EM FLAGRANTE",
                    "assunto": "CRIMES CONTRA A ORDEM ECONOMICA",
                    "assuntos_normalizados": [
                        {
                            "id": 2027,
                            "nome": "Crimes contra a Ordem Econômica",
                            "nome_com_pai": "Crimes Previstos na Legislação Extravagante > Crimes contra a Ordem Econômica",
                            "path_completo": "DIREITO PENAL > Crimes Previstos na Legislação Extravagante > Crimes contra a Ordem Econômica",
                            "bloqueado": false
                        },
                        null
                    ],
                    "assunto_principal_normalizado": {
                        "id": 2027,
                        "nome": "Crimes contra a Ordem Econômica",
                        "nome_com_pai": "Crimes Previstos na Legislação Extravagante > Crimes contra a Ordem Econômica",
                        "path_completo": "DIREITO PENAL > Crimes Previstos na Legislação Extravagante > Crimes contra a Ordem Econômica",
                        "bloqueado": false
                    },
                    "area": null,
                    "orgao_julgador": "4ª VARA FEDERAL CRIMINAL DA SJRR",
                    "valor_causa": {"valor": null, "moeda": null, "valor_formatado": null},
                    "data_distribuicao": "2023-04-01",
                    "data_arquivamento": null,
                    "informacoes_complementares": null
                },
                "url": "https://pje1g.trf1.jus.br/consultapublica/ConsultaPublica/listView.seam",
                "tribunal": {
                    "id": 5,
                    "nome": "Tribunal Regional Federal da 1ª Região",
                    "sigla": "TRF1",
                    "categoria": null
                },
                "quantidade_movimentacoes": 1,
                "quantidade_envolvidos": 1,
                "data_ultima_verificacao": "2023-04-01T13:45:30+00:00",
                "envolvidos": [
                    {
                        "nome": "Superintencia de Policia Federal Em Roraima",
                        "quantidade_processos": null,
                        "tipo_pessoa": "JURIDICA",
                        "prefixo": null,
                        "sufixo": null,
                        "tipo": "Autoridade",
                        "tipo_normalizado": "Autoridade",
                        "polo": "DESCONHECIDO",
                        "cnpj": "00394494009354"
                    }
                ]
            }
        ]
    })
}

// ============================================================================
// Processo Tests
// ============================================================================

#[test]
fn test_processo_from_json() {
    let processo = Processo::from_json(&processo_json()).unwrap();

    assert_eq!(processo.numero_cnj, "8690473-18.2023.4.01.4200");
    assert_eq!(processo.titulo_polo_ativo.as_deref(), Some("Ministério Público Federal"));
    assert_eq!(processo.ano_inicio, Some(2023));
    assert_eq!(processo.quantidade_movimentacoes, 1);
    assert_eq!(processo.fontes_tribunais_estao_arquivadas, Some(false));
    assert_eq!(processo.tipo_match.as_deref(), Some("NOME"));
    assert!(processo.match_fontes.unwrap().any());
    assert_eq!(
        processo.data_inicio_as_date(),
        chrono::NaiveDate::from_ymd_opt(2023, 4, 1)
    );

    let fonte = &processo.fontes[0];
    assert_eq!(fonte.id, 15399);
    assert_eq!(fonte.processo_fonte_id, 222514338);
    assert_eq!(fonte.grau, Some(1));
    assert_eq!(fonte.segredo_justica, None);
    assert_eq!(fonte.tribunal.as_ref().unwrap().sigla, "TRF1");
    assert_eq!(processo.fontes_tribunais().count(), 1);

    let capa = fonte.capa.as_ref().unwrap();
    assert_eq!(capa.assuntos_normalizados.len(), 1);
    assert_eq!(capa.assunto_principal_normalizado.as_ref().unwrap().id, 2027);
    assert!(capa.valor_causa.is_none());
    assert!(capa.informacoes_complementares.is_empty());
    assert!(capa.area.is_none());

    let envolvido = &fonte.envolvidos[0];
    assert_eq!(envolvido.documento(), Some("00394494009354"));
    assert_eq!(envolvido.quantidade_processos, None);
}

#[test]
fn test_processo_reads_back_its_own_output() {
    let processo = Processo::from_json(&processo_json()).unwrap();
    let out = serde_json::to_value(&processo).unwrap();

    let again = Processo::from_json(&out).unwrap();
    assert_eq!(again, processo);
    assert_eq!(again.fontes[0].envolvidos.len(), 1);
    assert_eq!(again.fontes[0].capa, processo.fontes[0].capa);
}

#[test]
fn test_processo_requires_numero_cnj() {
    let err = Processo::from_json(&json!({"quantidade_movimentacoes": 2})).unwrap_err();
    assert!(matches!(err, Error::MissingField { entity: "Processo", ref field } if field == "numero_cnj"));
}

#[test]
fn test_processo_skips_malformed_fontes() {
    let processo = Processo::from_json(&json!({
        "numero_cnj": "0000000-00.0000.0.00.0000",
        "fontes": [null, {"id": 1}]
    }))
    .unwrap();

    assert!(processo.fontes.is_empty());
    assert_eq!(processo.quantidade_movimentacoes, 0);
}

// ============================================================================
// Movimentacao Tests
// ============================================================================

#[test]
fn test_movimentacao_from_json() {
    let json = json!({
        "id": 6572980630i64,
        "data": "2022-11-03",
        "tipo": "ANDAMENTO",
        "conteudo": "Juntada de petição intercorrente",
        "fonte": {
            "fonte_id": 15299,
            "nome": "Tribunal Regional Federal da 1ª Região",
            "tipo": "TRIBUNAL",
            "sigla": "TRF1",
            "grau": 1,
            "grau_formatado": "Primeiro Grau"
        }
    });

    let mov = Movimentacao::from_json(&json).unwrap();
    assert_eq!(mov.id, 6572980630);
    assert_eq!(mov.data_as_date(), chrono::NaiveDate::from_ymd_opt(2022, 11, 3));
    assert_eq!(mov.tipo.as_deref(), Some("ANDAMENTO"));

    let fonte = mov.fonte.as_ref().unwrap();
    assert_eq!(fonte.id, 15299);
    assert_eq!(fonte.grau, Some(1));
    assert_eq!(fonte.grau_formatado.as_deref(), Some("Primeiro Grau"));

    let out = serde_json::to_value(&mov).unwrap();
    assert_eq!(out["fonte"]["fonte_id"], json!(15299));
}

#[test]
fn test_movimentacao_requires_data() {
    let err = Movimentacao::from_json(&json!({"id": 1})).unwrap_err();
    assert!(matches!(err, Error::MissingField { ref field, .. } if field == "data"));
}

// ============================================================================
// Tribunal Tests
// ============================================================================

#[test]
fn test_tribunal_from_json() {
    let tribunal = Tribunal::from_json(&json!({
        "id": 81,
        "nome": "Tribunal Regional do Trabalho da 3ª Região",
        "sigla": "TRT-3",
        "categoria": null,
        "estados": [{"nome": "Minas Gerais", "sigla": "MG"}]
    }))
    .unwrap();

    assert_eq!(tribunal.id, 81);
    assert_eq!(tribunal.categoria, None);
    assert_eq!(
        tribunal.estados,
        vec![Estado {
            sigla: "MG".to_string(),
            nome: Some("Minas Gerais".to_string()),
        }]
    );
    assert!(tribunal.abrange("mg"));
}

#[test]
fn test_tribunal_v1_state_codes() {
    let json = json!({
        "id": 2,
        "nome": "Tribunal de Justiça de São Paulo",
        "sigla": "TJSP",
        "estados": ["SP"]
    });

    let v1 = Tribunal::from_json_versioned(&json, ApiVersion::V1).unwrap();
    assert_eq!(v1.estados.len(), 1);
    assert_eq!(v1.estados[0].sigla, "SP");
    assert_eq!(v1.estados[0].nome, None);

    // The v2 decoder does not accept bare codes
    let v2 = Tribunal::from_json(&json).unwrap();
    assert!(v2.estados.is_empty());
    assert_eq!(v1, v2);
}

// ============================================================================
// Envolvido Tests
// ============================================================================

#[test]
fn test_envolvido_with_advogados() {
    let envolvido = Envolvido::from_json(&json!({
        "nome": "João da Silva",
        "tipo": "Autor",
        "tipo_pessoa": "FISICA",
        "polo": "ATIVO",
        "cpf": "12345678900",
        "advogados": [
            {
                "nome": "Maria Souza",
                "tipo": "Advogado",
                "oabs": [{"numero": 12345, "uf": "SP", "tipo": "ADVOGADO"}, null]
            },
            {"tipo": "sem nome"}
        ]
    }))
    .unwrap();

    assert_eq!(envolvido.documento(), Some("12345678900"));
    assert_eq!(envolvido.advogados.len(), 1);

    let advogado = &envolvido.advogados[0];
    assert!(advogado.is_advogado());
    assert_eq!(
        advogado.oabs,
        vec![Oab {
            numero: 12345,
            uf: "SP".to_string(),
            tipo: "ADVOGADO".to_string(),
        }]
    );
}

#[test]
fn test_envolvido_nome_may_be_null_but_present() {
    let envolvido = Envolvido::from_json(&json!({"nome": null, "tipo": null})).unwrap();
    assert_eq!(envolvido.nome, None);
    assert_eq!(envolvido.documento(), None);

    assert!(Envolvido::from_json(&json!({"tipo": null})).is_err());
}

#[test]
fn test_envolvido_encontrado() {
    let found = decode::<EnvolvidoEncontrado>(Some(&json!({
        "nome": "Escavador Engenharia",
        "tipo_pessoa": "JURIDICA",
        "quantidade_processos": 42
    })))
    .unwrap()
    .unwrap();

    assert_eq!(found.quantidade_processos, 42);
}

// ============================================================================
// ValorCausa Tests
// ============================================================================

#[test_case(1234.5, "R$", "R$ 1.234,50" ; "thousands")]
#[test_case(0.0, "R$", "R$ 0,00" ; "zero")]
#[test_case(999.999, "R$", "R$ 1.000,00" ; "rounds up")]
#[test_case(1234567.891, "R$", "R$ 1.234.567,89" ; "millions")]
#[test_case(-50.0, "US$", "US$ -50,00" ; "negative")]
#[test_case(12.3, "", "12,30" ; "no currency")]
fn test_format_currency(valor: f64, moeda: &str, expected: &str) {
    assert_eq!(format_currency(valor, moeda), expected);
}

#[test]
fn test_valor_causa_derives_display() {
    let valor = ValorCausa::from_json(&json!({
        "valor": 1234.5,
        "moeda": "R$",
        "valor_formatado": null
    }))
    .unwrap();

    assert_eq!(valor.to_string(), "R$ 1.234,50");
}

#[test]
fn test_valor_causa_keeps_server_display() {
    let valor = ValorCausa::from_json(&json!({
        "valor": "1500.00",
        "moeda": "R$",
        "valor_formatado": "R$ 1.500,00 (mil e quinhentos)"
    }))
    .unwrap();

    assert_eq!(valor.valor, 1500.0);
    assert_eq!(valor.valor_formatado, "R$ 1.500,00 (mil e quinhentos)");
}

#[test]
fn test_valor_causa_comparisons() {
    let a = ValorCausa::new(100.0, "R$");
    let mut b = ValorCausa::new(100.0, "R$");
    b.valor_formatado = "cem reais".to_string();
    let c = ValorCausa::new(200.0, "R$");
    let d = ValorCausa::new(200.0, "US$");

    assert_eq!(a, b);
    assert!(a < c);
    assert_eq!(c.partial_cmp(&d), None);
    assert!(a.partial_cmp(&d).is_none());
    assert_ne!(c, d);
}

// ============================================================================
// Saldo / helpers
// ============================================================================

#[test]
fn test_saldo() {
    let saldo = Saldo::from_json(&json!({"quantidade_creditos": "87.5"})).unwrap();
    assert_eq!(saldo.quantidade_creditos, 87.5);
    assert!(saldo.cobre(80.0));
    assert!(!saldo.cobre(90.0));
}

#[test_case("2023-04-01", Some((2023, 4, 1)) ; "date")]
#[test_case("2023-04-01T13:45:30+00:00", Some((2023, 4, 1)) ; "timestamp")]
#[test_case("01/04/2023", None ; "other format")]
#[test_case("2023", None ; "too short")]
fn test_parse_date(raw: &str, expected: Option<(i32, u32, u32)>) {
    let expected = expected.and_then(|(y, m, d)| chrono::NaiveDate::from_ymd_opt(y, m, d));
    assert_eq!(parse_date(raw), expected);
}

// ============================================================================
// Round trip properties
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Whether every non-null field of `expected` reappears in `actual`.
    ///
    /// Empty lists may be omitted on serialization.
    fn reproduces(expected: &Value, actual: Option<&Value>) -> bool {
        match expected {
            Value::Null => true,
            Value::Object(fields) => match actual {
                Some(Value::Object(out)) => fields.iter().all(|(k, v)| reproduces(v, out.get(k))),
                _ => false,
            },
            Value::Array(items) => match actual {
                Some(Value::Array(out)) => {
                    items.len() == out.len()
                        && items.iter().zip(out).all(|(e, a)| reproduces(e, Some(a)))
                }
                None => items.is_empty(),
                _ => false,
            },
            scalar => actual == Some(scalar),
        }
    }

    fn arb_text() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z ]{0,15}"
    }

    fn arb_date() -> impl Strategy<Value = String> {
        (1990i32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
    }

    fn insert_opt<T: Into<Value>>(obj: &mut Map<String, Value>, key: &str, value: Option<T>) {
        if let Some(v) = value {
            obj.insert(key.to_string(), v.into());
        }
    }

    fn arb_tribunal() -> impl Strategy<Value = Value> {
        (
            1i64..100_000,
            arb_text(),
            "[A-Z]{2,5}",
            proptest::option::of(arb_text()),
            prop::collection::vec(("[A-Z]{2}", proptest::option::of(arb_text())), 0..3),
        )
            .prop_map(|(id, nome, sigla, categoria, estados)| {
                let mut obj = Map::new();
                obj.insert("id".into(), id.into());
                obj.insert("nome".into(), nome.into());
                obj.insert("sigla".into(), sigla.into());
                insert_opt(&mut obj, "categoria", categoria);
                let estados: Vec<Value> = estados
                    .into_iter()
                    .map(|(sigla, nome)| {
                        let mut e = Map::new();
                        e.insert("sigla".into(), sigla.into());
                        insert_opt(&mut e, "nome", nome);
                        Value::Object(e)
                    })
                    .collect();
                obj.insert("estados".into(), estados.into());
                Value::Object(obj)
            })
    }

    fn arb_movimentacao() -> impl Strategy<Value = Value> {
        (
            1i64..i64::MAX,
            arb_date(),
            proptest::option::of(arb_text()),
            proptest::option::of(arb_text()),
            proptest::option::of((1i64..100_000, proptest::option::of(1i64..4))),
        )
            .prop_map(|(id, data, tipo, conteudo, fonte)| {
                let mut obj = Map::new();
                obj.insert("id".into(), id.into());
                obj.insert("data".into(), data.into());
                insert_opt(&mut obj, "tipo", tipo);
                insert_opt(&mut obj, "conteudo", conteudo);
                if let Some((fonte_id, grau)) = fonte {
                    let mut f = Map::new();
                    f.insert("fonte_id".into(), fonte_id.into());
                    insert_opt(&mut f, "grau", grau);
                    obj.insert("fonte".into(), Value::Object(f));
                }
                Value::Object(obj)
            })
    }

    fn arb_envolvido() -> impl Strategy<Value = Value> {
        (
            proptest::option::of(arb_text()),
            proptest::option::of(arb_text()),
            proptest::option::of(prop_oneof![Just("ATIVO"), Just("PASSIVO"), Just("NENHUM")]),
            proptest::option::of("[0-9]{11}"),
            prop::collection::vec((1i64..999_999, "[A-Z]{2}"), 0..3),
        )
            .prop_map(|(nome, tipo, polo, cpf, oabs)| {
                let mut obj = Map::new();
                obj.insert("nome".into(), nome.map_or(Value::Null, Value::from));
                obj.insert("tipo".into(), tipo.map_or(Value::Null, Value::from));
                insert_opt(&mut obj, "polo", polo);
                insert_opt(&mut obj, "cpf", cpf);
                let oabs: Vec<Value> = oabs
                    .into_iter()
                    .map(|(numero, uf)| json!({"numero": numero, "uf": uf, "tipo": "ADVOGADO"}))
                    .collect();
                obj.insert("oabs".into(), oabs.into());
                Value::Object(obj)
            })
    }

    fn arb_processo() -> impl Strategy<Value = Value> {
        (
            "[0-9]{7}-[0-9]{2}\\.[0-9]{4}\\.[0-9]\\.[0-9]{2}\\.[0-9]{4}",
            proptest::option::of(arb_text()),
            proptest::option::of(1990i64..2030),
            proptest::option::of(arb_date()),
            0i64..10_000,
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(cnj, polo_ativo, ano, data_inicio, qtd, arquivadas)| {
                let mut obj = Map::new();
                obj.insert("numero_cnj".into(), cnj.into());
                insert_opt(&mut obj, "titulo_polo_ativo", polo_ativo);
                insert_opt(&mut obj, "ano_inicio", ano);
                insert_opt(&mut obj, "data_inicio", data_inicio);
                obj.insert("quantidade_movimentacoes".into(), qtd.into());
                insert_opt(&mut obj, "fontes_tribunais_estao_arquivadas", arquivadas);
                Value::Object(obj)
            })
    }

    fn arb_valor_causa() -> impl Strategy<Value = Value> {
        (0u64..10_000_000_000, prop_oneof![Just("R$"), Just("US$")]).prop_map(|(cents, moeda)| {
            let valor = cents as f64 / 100.0;
            json!({
                "valor": valor,
                "moeda": moeda,
                "valor_formatado": format_currency(valor, moeda),
            })
        })
    }

    /// Decode, serialize and decode again: the output keeps every input
    /// field and reads back as the same entity
    fn round_trips<T: FromJson + serde::Serialize + PartialEq>(json: &Value) -> bool {
        let Ok(entity) = T::from_json(json) else {
            return false;
        };
        let Ok(out) = serde_json::to_value(&entity) else {
            return false;
        };
        reproduces(json, Some(&out)) && T::from_json(&out).is_ok_and(|again| again == entity)
    }

    proptest! {
        #[test]
        fn tribunal_round_trips(json in arb_tribunal()) {
            prop_assert!(round_trips::<Tribunal>(&json), "{}", json);
        }

        #[test]
        fn movimentacao_round_trips(json in arb_movimentacao()) {
            prop_assert!(round_trips::<Movimentacao>(&json), "{}", json);
        }

        #[test]
        fn envolvido_round_trips(json in arb_envolvido()) {
            prop_assert!(round_trips::<Envolvido>(&json), "{}", json);
        }

        #[test]
        fn processo_round_trips(json in arb_processo()) {
            prop_assert!(round_trips::<Processo>(&json), "{}", json);
        }

        #[test]
        fn valor_causa_round_trips(json in arb_valor_causa()) {
            prop_assert!(round_trips::<ValorCausa>(&json), "{}", json);
        }

        #[test]
        fn decode_null_is_none(_seed in any::<u8>()) {
            prop_assert!(decode::<Processo>(Some(&Value::Null)).unwrap().is_none());
            prop_assert!(decode::<Tribunal>(None).unwrap().is_none());
        }
    }
}
